use crate::error::ConfigError;

#[derive(Debug, PartialEq, Eq)]
pub struct Config {
    pub images: Vec<String>,
}

impl Config {
    /// Validates a list of image paths already extracted from the command
    /// line. Kept separate from the `clap` parsing in `main` so it stays
    /// unit-testable without constructing a full `clap::App`.
    pub fn from_images(images: Vec<String>) -> Result<Self, ConfigError> {
        if images.is_empty() {
            return Err(ConfigError::NoImages);
        }

        Ok(Config { images })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_single_image() {
        let config = Config::from_images(vec!["program.obj".to_string()]).unwrap();
        assert_eq!(config.images, vec!["program.obj".to_string()]);
    }

    #[test]
    fn accepts_multiple_images_in_order() {
        let config =
            Config::from_images(vec!["a.obj".to_string(), "b.obj".to_string()]).unwrap();
        assert_eq!(config.images, vec!["a.obj".to_string(), "b.obj".to_string()]);
    }

    #[test]
    fn rejects_no_images() {
        assert_eq!(Config::from_images(vec![]), Err(ConfigError::NoImages));
    }
}
