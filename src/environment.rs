use std::env;

/// Extra left-leaning newspaper names, `;`-separated.
pub const LEFT_NEWSPAPERS_ENV: &str = "BARSEL_LEFT_NEWSPAPERS";
/// Extra right-leaning newspaper names, `;`-separated.
pub const RIGHT_NEWSPAPERS_ENV: &str = "BARSEL_RIGHT_NEWSPAPERS";

/// Retrieves an environment variable and splits it into a vector of strings based on a delimiter.
///
/// # Arguments
/// - `var`: The name of the environment variable.
/// - `delimiter`: The character to split the environment variable's value by.
///
/// # Returns
/// - `Vec<String>` with surrounding whitespace trimmed and empty entries removed.
pub fn get_env_var_as_vec(var: &str, delimiter: char) -> Vec<String> {
    split_list(&env::var(var).unwrap_or_default(), delimiter)
}

fn split_list(value: &str, delimiter: char) -> Vec<String> {
    value
        .split(delimiter)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
