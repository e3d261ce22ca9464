use common::types::dtos::DeliveryPersonRegistration;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  login <email> <password>
  register <name> | <email> | <password> | <confirm_password> | <mobile> | <age> | <nic>
           | <vehicle_number> | <current_location> | <address> | <license_number>
  logout | profile | status <on|off> | delete-account
  orders            orders waiting for a delivery person
  mine              orders assigned to you
  accept <order_id> | deliver <order_id> | cancel <order_id>
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login { email: String, password: String },
    Register(DeliveryPersonRegistration),
    Logout,
    Profile,
    SetAvailable(bool),
    DeleteAccount,
    Available,
    Mine,
    Accept(String),
    Deliver(String),
    Cancel(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    if name.is_empty() {
        return Ok(None);
    }
    let words: Vec<&str> = rest.split_whitespace().collect();
    let order_id = |usage: &'static str| {
        words
            .first()
            .map(|id| id.to_string())
            .ok_or(CommandError::Usage(usage))
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "login" => match words.as_slice() {
            [email, password] => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            _ => return Err(CommandError::Usage("login <email> <password>")),
        },
        "register" => {
            let parts: Vec<String> = rest.split('|').map(|f| f.trim().to_string()).collect();
            let [name, email, password, confirmed_password, mobile, age, nic, vehicle_number, current_location, address, license_number] =
                <[String; 11]>::try_from(parts).map_err(|_| CommandError::Usage("register <11 fields separated by '|'>, see 'help'"))?;
            Command::Register(DeliveryPersonRegistration {
                name,
                email,
                password,
                confirmed_password,
                mobile,
                age,
                nic,
                vehicle_number,
                current_location,
                address,
                license_number,
            })
        }
        "logout" => Command::Logout,
        "profile" | "whoami" => Command::Profile,
        "status" => match words.first().map(|w| w.to_ascii_lowercase()).as_deref() {
            Some("on") => Command::SetAvailable(true),
            Some("off") => Command::SetAvailable(false),
            _ => return Err(CommandError::Usage("status <on|off>")),
        },
        "delete-account" => Command::DeleteAccount,
        "orders" | "available" => Command::Available,
        "mine" => Command::Mine,
        "accept" => Command::Accept(order_id("accept <order_id>")?),
        "deliver" => Command::Deliver(order_id("deliver <order_id>")?),
        "cancel" => Command::Cancel(order_id("cancel <order_id>")?),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_needs_every_field() {
        let line = "register Saman Perera | saman@example.com | pw | pw | 0711111111 | 29 | 951234567V \
                    | WP-BAA-1234 | Colombo 03 | 4 Flower Rd | B1234567";
        let Ok(Some(Command::Register(form))) = parse(line) else {
            panic!("register did not parse");
        };
        assert_eq!(form.name, "Saman Perera");
        assert_eq!(form.age, "29");
        assert_eq!(form.license_number, "B1234567");

        assert!(matches!(parse("register Saman | x@y.z"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_status_toggle() {
        assert_eq!(parse("status ON"), Ok(Some(Command::SetAvailable(true))));
        assert_eq!(parse("status off"), Ok(Some(Command::SetAvailable(false))));
        assert_eq!(parse("status maybe"), Err(CommandError::Usage("status <on|off>")));
    }

    #[test]
    fn test_order_commands() {
        assert_eq!(parse("accept o1"), Ok(Some(Command::Accept("o1".to_string()))));
        assert_eq!(parse("deliver"), Err(CommandError::Usage("deliver <order_id>")));
        assert_eq!(parse("available"), Ok(Some(Command::Available)));
        assert_eq!(parse(""), Ok(None));
    }
}
