/// Validate a folder label before it becomes part of storage keys.
///
/// The label is used verbatim as a single path segment of every object key
/// written during a run, so separators, traversal sequences and whitespace
/// are rejected.
pub fn validate_folder_label(label: &str) -> anyhow::Result<()> {
    if label.is_empty() {
        anyhow::bail!("Folder label cannot be empty");
    }
    if label.contains('/') || label.contains("..") || label.chars().any(char::is_whitespace) {
        anyhow::bail!("Folder label cannot contain '/', '..' or whitespace: {}", label);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_folder_label_accepts_plain_labels() {
        assert!(validate_folder_label("july_2025").is_ok());
        assert!(validate_folder_label("batch-7").is_ok());
    }

    #[test]
    fn validate_folder_label_rejects_empty() {
        assert!(validate_folder_label("").is_err());
    }

    #[test]
    fn validate_folder_label_rejects_separators_and_traversal() {
        assert!(validate_folder_label("july/2025").is_err());
        assert!(validate_folder_label("..").is_err());
        assert!(validate_folder_label("a..b").is_err());
    }

    #[test]
    fn validate_folder_label_rejects_whitespace() {
        assert!(validate_folder_label("july 2025").is_err());
    }
}

/// Initialize tracing subscriber for CLI applications
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
