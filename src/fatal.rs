//! User-facing fatal error reporting.
//!
//! The refresh core returns classified errors; the decision to notify the
//! user and terminate is made here, at the shell layer.

use tracing::error;

use crate::config::ConfigError;
use crate::constants::files::CONFIG_FILE;

const MALFORMED_TEXT: &str = r#"Config file content is wrong.

Example:
  IMG_PATH.JPG     # image path (absolute or relative)
  220 250          # size of one image
  50 50            # window top-left position
  100 100 150 150  # red rectangle
  160 100 200 200  # green rectangle

Please check it and restart the application."#;

/// Show a blocking warning dialog for a fatal configuration error, then
/// terminate. The exit status stays 0; the dialog is the failure signal.
pub fn report_fatal_error(err: &ConfigError) -> ! {
    error!("fatal configuration error: {err}");
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Warning)
        .set_title("Warning")
        .set_description(dialog_text(err))
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
    std::process::exit(0);
}

fn dialog_text(err: &ConfigError) -> String {
    match err {
        ConfigError::FileNotFound(_) => format!("Can't find the \"{CONFIG_FILE}\" file."),
        ConfigError::FileUnreadable(..) => format!("Can't open the \"{CONFIG_FILE}\" file."),
        ConfigError::MalformedContent(_) => MALFORMED_TEXT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_dialog_text_names_the_config_file() {
        let text = dialog_text(&ConfigError::FileNotFound(PathBuf::from("config.txt")));
        assert!(text.contains("config.txt"));
    }

    #[test]
    fn test_malformed_dialog_shows_the_expected_format() {
        let text = dialog_text(&ConfigError::MalformedContent("bad size line".to_string()));
        assert!(text.contains("Example:"));
        assert!(text.contains("red rectangle"));
        assert!(text.contains("restart the application"));
    }
}
