use crate::DEFAULT_ADDR;

/// What the process was asked to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Client { addr: String },
    Server { addr: String },
}

/// Parses `<client|server> [addr]`. Any other shape is the usage path.
pub fn parse<I>(mut args: I) -> Option<Command>
where
    I: Iterator<Item = String>,
{
    let mode = args.next()?;
    let addr = args.next().unwrap_or_else(|| DEFAULT_ADDR.to_owned());
    if args.next().is_some() {
        return None;
    }

    match mode.as_str() {
        "client" => Some(Command::Client { addr }),
        "server" => Some(Command::Server { addr }),
        _ => None,
    }
}

/// Usage text, printed on any unrecognized invocation.
pub fn usage() -> String {
    format!("Usage: simple-grpc <client|server> [addr]  (default addr: {DEFAULT_ADDR})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_of(args: &[&str]) -> Option<Command> {
        parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn client_with_default_addr() {
        assert_eq!(
            parse_of(&["client"]),
            Some(Command::Client {
                addr: DEFAULT_ADDR.to_owned()
            })
        );
    }

    #[test]
    fn server_with_explicit_addr() {
        assert_eq!(
            parse_of(&["server", "127.0.0.1:9000"]),
            Some(Command::Server {
                addr: "127.0.0.1:9000".to_owned()
            })
        );
    }

    #[test]
    fn unrecognized_command_is_the_usage_path() {
        assert_eq!(parse_of(&["foo"]), None);
        assert_eq!(parse_of(&[]), None);
        assert_eq!(parse_of(&["client", "localhost:8001", "extra"]), None);
    }
}
