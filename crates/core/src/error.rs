use thiserror::Error;

use crate::model::FilterError;
use crate::model::ParseDifficultyError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error(transparent)]
    ParseDifficulty(#[from] ParseDifficultyError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DifficultyLevel, StoryFilter};

    #[test]
    fn filter_errors_convert_and_stay_transparent() {
        let err: Error = StoryFilter::new().with_language("").unwrap_err().into();
        assert!(matches!(err, Error::Filter(FilterError::EmptyLanguage)));
        assert_eq!(err.to_string(), "language must not be empty");
    }

    #[test]
    fn parse_errors_convert() {
        let err: Error = "fluent".parse::<DifficultyLevel>().unwrap_err().into();
        assert!(matches!(err, Error::ParseDifficulty(_)));
    }
}
