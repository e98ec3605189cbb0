use clap::Parser;

/// Generate a compliance report for an object in the configured S3 bucket
/// and upload it to `reports/`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Key of the object to process, e.g. `uploads/doc1.pdf`
    pub s3_key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn test_single_key() {
        let args = Args::try_parse_from(["policy-report", "uploads/doc1.pdf"]).unwrap();
        assert_eq!(args.s3_key, "uploads/doc1.pdf");
    }

    #[test]
    fn test_no_key_rejected() {
        let err = Args::try_parse_from(["policy-report"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_extra_arguments_rejected() {
        let err = Args::try_parse_from(["policy-report", "a.pdf", "b.pdf"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_help_is_not_a_usage_error() {
        let err = Args::try_parse_from(["policy-report", "--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert!(!err.use_stderr());
    }
}
