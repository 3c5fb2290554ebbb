#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandLineConfig {
    pub database: Option<String>,
    pub command: String,
    pub command_args: Vec<String>,
}

impl CommandLineConfig {
    pub fn from_args(args: &[&str]) -> Result<Self, String> {
        let mut database = None;
        let mut command = String::from("fields");
        let mut command_args = Vec::new();
        let mut command_set = false;
        let mut iter = args.iter().skip(1);
        while let Some(arg) = iter.next() {
            if command_set {
                command_args.push(arg.to_string());
                continue;
            }
            match *arg {
                "--db" | "--database" => {
                    database = Some(
                        iter.next()
                            .ok_or_else(|| "--db requires a value".to_string())?
                            .to_string(),
                    );
                }
                "--command" => {
                    command = iter
                        .next()
                        .ok_or_else(|| "--command requires a value".to_string())?
                        .to_string();
                    command_set = true;
                }
                other if other.starts_with('-') => {
                    return Err(format!("unknown flag {other}"));
                }
                _ => {
                    command = arg.to_string();
                    command_set = true;
                }
            }
        }
        Ok(Self {
            database,
            command,
            command_args,
        })
    }

    /// First positional argument after the command.
    pub fn arg(&self, what: &str) -> Result<&str, String> {
        self.command_args
            .first()
            .map(|s| s.as_str())
            .ok_or_else(|| format!("{} requires {what}", self.command))
    }

    pub fn help() -> &'static str {
        "Usage: arrayconfig [--db PATH] <command> [args]\n\
         \n\
         Commands:\n\
         \x20 fields [TYPE]     show the fields of an array config type\n\
         \x20 validate FILE     check a config file\n\
         \x20 describe FILE     resolve a config file and print its arrays\n\
         \x20 read FILE         resolve a config file and summarize its voxels\n\
         \x20 store FILE        save a config file into --db\n\
         \x20 list              list configs stored in --db\n\
         \x20 show NAME         print a stored config\n\
         \x20 delete NAME       remove a stored config\n"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CommandLineConfig::from_args(&["arrayconfig"]).unwrap();
        assert_eq!(cfg.command, "fields");
        assert!(cfg.database.is_none());
        assert!(cfg.command_args.is_empty());
    }

    #[test]
    fn test_db_and_command_args() {
        let cfg =
            CommandLineConfig::from_args(&["arrayconfig", "--db", "configs.db", "show", "mask"])
                .unwrap();
        assert_eq!(cfg.database.as_deref(), Some("configs.db"));
        assert_eq!(cfg.command, "show");
        assert_eq!(cfg.arg("a name").unwrap(), "mask");
    }

    #[test]
    fn test_flags_after_command_are_args() {
        let cfg = CommandLineConfig::from_args(&["arrayconfig", "fields", "--db"]).unwrap();
        assert_eq!(cfg.command_args, vec!["--db"]);
    }

    #[test]
    fn test_errors() {
        assert!(CommandLineConfig::from_args(&["arrayconfig", "--db"]).is_err());
        assert!(CommandLineConfig::from_args(&["arrayconfig", "--verbose"]).is_err());
        let cfg = CommandLineConfig::from_args(&["arrayconfig", "validate"]).unwrap();
        assert_eq!(cfg.arg("a file").unwrap_err(), "validate requires a file");
    }
}
