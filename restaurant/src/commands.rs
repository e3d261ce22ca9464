use common::types::menu::{ImageSource, MenuItemDraft};
use std::path::PathBuf;
use thiserror::Error;

pub const HELP: &str = "\
Commands (fields with spaces are separated by '|'):
  login <email> <password>
  register <name> | <email> | <password> | <location> | <owner_name> | <mobile> [| <image_id>]
  logout | profile
  menu
  add-item <name> | <description> | <price> | <category> | <image_path>
  edit-item <item_id> <name> | <description> | <price> | <category> [| <image_path>]
  delete-item <item_id>
  reviews
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login { email: String, password: String },
    Register(RegisterForm),
    Logout,
    Profile,
    Menu,
    AddItem(MenuItemDraft),
    EditItem { item_id: String, draft: MenuItemDraft },
    DeleteItem(String),
    Reviews,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub location: String,
    pub owner_name: String,
    pub mobile: String,
    pub image_id: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a valid price")]
    NotAPrice(String),
}

/// Splits `a | b | c` into trimmed fields.
fn fields(raw: &str) -> Vec<String> {
    raw.split('|').map(|f| f.trim().to_string()).collect()
}

fn draft(parts: &[String], usage: &'static str) -> Result<MenuItemDraft, CommandError> {
    let [name, description, price, category, rest @ ..] = parts else {
        return Err(CommandError::Usage(usage));
    };
    let price = price
        .parse()
        .map_err(|_| CommandError::NotAPrice(price.clone()))?;
    let image = rest
        .first()
        .filter(|path| !path.is_empty())
        .map(|path| ImageSource::File(PathBuf::from(path)));
    Ok(MenuItemDraft {
        name: name.clone(),
        description: description.clone(),
        price,
        category: category.clone(),
        image,
    })
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
            const USAGE: &str =
                "register <name> | <email> | <password> | <location> | <owner_name> | <mobile> [| <image_id>]";
            let parts = fields(rest);
            let [name, email, password, location, owner_name, mobile, image @ ..] = parts.as_slice()
            else {
                return Err(CommandError::Usage(USAGE));
            };
            Command::Register(RegisterForm {
                name: name.clone(),
                email: email.clone(),
                password: password.clone(),
                location: location.clone(),
                owner_name: owner_name.clone(),
                mobile: mobile.clone(),
                image_id: image.first().cloned().unwrap_or_default(),
            })
        }
        "logout" => Command::Logout,
        "profile" | "whoami" => Command::Profile,
        "menu" => Command::Menu,
        "add-item" => Command::AddItem(draft(
            &fields(rest),
            "add-item <name> | <description> | <price> | <category> | <image_path>",
        )?),
        "edit-item" => {
            const USAGE: &str =
                "edit-item <item_id> <name> | <description> | <price> | <category> [| <image_path>]";
            let Some((item_id, fields_raw)) = rest.split_once(char::is_whitespace) else {
                return Err(CommandError::Usage(USAGE));
            };
            Command::EditItem {
                item_id: item_id.to_string(),
                draft: draft(&fields(fields_raw), USAGE)?,
            }
        }
        "delete-item" => match words.first() {
            Some(id) => Command::DeleteItem(id.to_string()),
            None => return Err(CommandError::Usage("delete-item <item_id>")),
        },
        "reviews" => Command::Reviews,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_item_fields() {
        let parsed = parse("add-item Egg Hoppers | Crispy bowls | 3.5 | Breakfast | ./hoppers.jpg");
        assert_eq!(
            parsed,
            Ok(Some(Command::AddItem(MenuItemDraft {
                name: "Egg Hoppers".to_string(),
                description: "Crispy bowls".to_string(),
                price: 3.5,
                category: "Breakfast".to_string(),
                image: Some(ImageSource::File(PathBuf::from("./hoppers.jpg"))),
            })))
        );
    }

    #[test]
    fn test_edit_item_without_image() {
        let Ok(Some(Command::EditItem { item_id, draft })) =
            parse("edit-item m1 Egg Hoppers | Crispy bowls | 4 | Breakfast")
        else {
            panic!("edit-item did not parse");
        };
        assert_eq!(item_id, "m1");
        assert_eq!(draft.price, 4.0);
        assert_eq!(draft.image, None);
    }

    #[test]
    fn test_bad_price_and_usage() {
        assert_eq!(
            parse("add-item A | B | cheap | C | x.jpg"),
            Err(CommandError::NotAPrice("cheap".to_string()))
        );
        assert!(matches!(parse("add-item A | B"), Err(CommandError::Usage(_))));
        assert!(matches!(parse("edit-item"), Err(CommandError::Usage(_))));
    }

    #[test]
    fn test_register_image_is_optional() {
        let Ok(Some(Command::Register(form))) =
            parse("register Hela Bojun | hela@example.com | pw | Kandy | Nimal Perera | 0771234567")
        else {
            panic!("register did not parse");
        };
        assert_eq!(form.name, "Hela Bojun");
        assert_eq!(form.owner_name, "Nimal Perera");
        assert_eq!(form.image_id, "");
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(parse("  "), Ok(None));
        assert_eq!(parse("cook"), Err(CommandError::Unknown("cook".to_string())));
    }
}
