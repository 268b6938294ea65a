use std::fs;

use tracing::error;

/// Resolves a secret either from a file named by `file_var_name` (Docker
/// secrets style) or directly from `var_name`. The file wins when both are
/// set. `lookup` is usually `std::env::var(..).ok()`.
pub fn get_secret<F>(lookup: F, file_var_name: &str, var_name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(secret_file_path) = lookup(file_var_name) {
        match fs::read_to_string(&secret_file_path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) => {
                error!(%secret_file_path, ?e, "Error reading secret file");
                None
            }
        }
    } else {
        lookup(var_name)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    #[test]
    fn file_takes_precedence_over_plain_variable() {
        let path = std::env::temp_dir().join(format!("secret-{}", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "from-file").unwrap();

        let vars = HashMap::from([
            ("API_PASSWORD_FILE", path.to_string_lossy().into_owned()),
            ("API_PASSWORD", "from-env".to_string()),
        ]);
        let secret = get_secret(|k| vars.get(k).cloned(), "API_PASSWORD_FILE", "API_PASSWORD");

        assert_eq!(secret.as_deref(), Some("from-file"));
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn unreadable_file_yields_none() {
        let vars = HashMap::from([
            ("API_PASSWORD_FILE", "/nonexistent/secret".to_string()),
            ("API_PASSWORD", "from-env".to_string()),
        ]);
        let secret = get_secret(|k| vars.get(k).cloned(), "API_PASSWORD_FILE", "API_PASSWORD");

        assert_eq!(secret, None);
    }

    #[test]
    fn falls_back_to_plain_variable() {
        let vars = HashMap::from([("API_PASSWORD", "from-env".to_string())]);
        let secret = get_secret(|k| vars.get(k).cloned(), "API_PASSWORD_FILE", "API_PASSWORD");

        assert_eq!(secret.as_deref(), Some("from-env"));
    }
}
