use gamedata::error::GameDataError;

pub mod configuration;
pub mod image;
pub mod map;
pub mod record;

/// Splits `column=value` arguments
pub(crate) fn parse_fields(args: &[String]) -> Result<Vec<(String, String)>, GameDataError> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.to_string()))
                .filter(|(k, _)| !k.is_empty())
                .ok_or_else(|| GameDataError::BadInput(format!("expected column=value, got '{arg}'")))
        })
        .collect()
}
