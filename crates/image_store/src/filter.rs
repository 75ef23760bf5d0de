/// Image file extensions accepted for upload
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Returns true when the filename carries an allowed image extension.
///
/// The check is case-insensitive and looks at the final extension only,
/// so `shot.final.PNG` passes and `notes.txt` does not. It runs locally,
/// before any network call.
pub fn is_allowed_image_file(filename: &str) -> bool {
    let Some((_, extension)) = filename.rsplit_once('.') else {
        return false;
    };

    let extension = extension.to_ascii_lowercase();
    ALLOWED_IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| *allowed == extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_extensions() {
        assert!(is_allowed_image_file("photo.jpg"));
        assert!(is_allowed_image_file("photo.jpeg"));
        assert!(is_allowed_image_file("photo.png"));
        assert!(is_allowed_image_file("photo.gif"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(is_allowed_image_file("photo.JPG"));
        assert!(is_allowed_image_file("photo.Png"));
        assert!(is_allowed_image_file("shot.final.PNG"));
    }

    #[test]
    fn test_rejects_non_image_files() {
        assert!(!is_allowed_image_file("notes.txt"));
        assert!(!is_allowed_image_file("archive.tar.gz"));
        assert!(!is_allowed_image_file("photo.jpg.exe"));
        assert!(!is_allowed_image_file("photo"));
        assert!(!is_allowed_image_file(""));
    }
}
