use common::errors::ValidationError;
use common::types::identity::Role;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  login <user|restaurant|deliveryPerson> <email> <password>
  register <username> <email> <password> <confirm_password>
  logout | whoami
  restaurants | restaurant <id> | menu <restaurant_id>
  add <item_id> [quantity] | cart | update <item_id> <quantity>
  remove <item_id> | clear | checkout <address>
  orders | track <order_id> | leave
  pay <order_id> | verify <payment_intent_id>
  reviews <restaurant_id> | review <restaurant_id> <rating> <text>
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Quit,
    Login {
        role: Role,
        email: String,
        password: String,
    },
    Register {
        username: String,
        email: String,
        password: String,
        confirmed_password: String,
    },
    Logout,
    WhoAmI,
    Restaurants,
    Restaurant(String),
    Menu(String),
    Add {
        item_id: String,
        quantity: u32,
    },
    Cart,
    Update {
        item_id: String,
        quantity: u32,
    },
    Remove(String),
    Clear,
    Checkout(String),
    Orders,
    Track(String),
    Leave,
    Pay(String),
    Verify(String),
    Reviews(String),
    Review {
        restaurant_id: String,
        rating: u8,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help'")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("'{0}' is not a valid number")]
    NotANumber(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::NotANumber(raw.to_string()))
}

/// Everything after the first `skip` words, original spacing collapsed.
fn rest(words: &[&str], skip: usize) -> String {
    words.iter().skip(skip).copied().collect::<Vec<_>>().join(" ")
}

/// Parses one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, args)) = words.split_first() else {
        return Ok(None);
    };
    let arg = |i: usize, usage: &'static str| {
        args.get(i)
            .map(|s| s.to_string())
            .ok_or(CommandError::Usage(usage))
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "login" => {
            const USAGE: &str = "login <role> <email> <password>";
            Command::Login {
                role: arg(0, USAGE)?.parse()?,
                email: arg(1, USAGE)?,
                password: arg(2, USAGE)?,
            }
        }
        "register" => {
            const USAGE: &str = "register <username> <email> <password> <confirm_password>";
            Command::Register {
                username: arg(0, USAGE)?,
                email: arg(1, USAGE)?,
                password: arg(2, USAGE)?,
                confirmed_password: arg(3, USAGE)?,
            }
        }
        "logout" => Command::Logout,
        "whoami" => Command::WhoAmI,
        "restaurants" => Command::Restaurants,
        "restaurant" => Command::Restaurant(arg(0, "restaurant <id>")?),
        "menu" => Command::Menu(arg(0, "menu <restaurant_id>")?),
        "add" => Command::Add {
            item_id: arg(0, "add <item_id> [quantity]")?,
            quantity: match args.get(1) {
                Some(raw) => number(raw)?,
                None => 1,
            },
        },
        "cart" => Command::Cart,
        "update" => {
            const USAGE: &str = "update <item_id> <quantity>";
            Command::Update {
                item_id: arg(0, USAGE)?,
                quantity: number(&arg(1, USAGE)?)?,
            }
        }
        "remove" => Command::Remove(arg(0, "remove <item_id>")?),
        "clear" => Command::Clear,
        "checkout" => Command::Checkout(rest(&words, 1)),
        "orders" => Command::Orders,
        "track" => Command::Track(arg(0, "track <order_id>")?),
        "leave" => Command::Leave,
        "pay" => Command::Pay(arg(0, "pay <order_id>")?),
        "verify" => Command::Verify(arg(0, "verify <payment_intent_id>")?),
        "reviews" => Command::Reviews(arg(0, "reviews <restaurant_id>")?),
        "review" => {
            const USAGE: &str = "review <restaurant_id> <rating> <text>";
            Command::Review {
                restaurant_id: arg(0, USAGE)?,
                rating: number(&arg(1, USAGE)?)?,
                text: rest(&words, 3),
            }
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
