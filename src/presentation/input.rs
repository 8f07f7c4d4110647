use crate::application::App;
use crate::infrastructure::SnapshotStore;
use crate::presentation::view::{help_lines, render_list, render_total};

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Help,
    List,
    Total,
    SetName(String),
    SetPrice(String),
    Submit,
    Add { name: String, price: String },
    Remove(usize),
    MoveUp(usize),
    MoveDown(usize),
    Toggle(usize),
    Email,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an item number")]
    MissingPosition(&'static str),
    #[error("`{0}` is not an item number")]
    BadPosition(String),
}

impl Command {
    /// Parses one line. Item numbers are 1-based and converted to positions.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "help" | "?" => Command::Help,
            "list" | "ls" => Command::List,
            "total" => Command::Total,
            "name" => Command::SetName(rest.to_string()),
            "price" => Command::SetPrice(rest.to_string()),
            "add" if rest.is_empty() => Command::Submit,
            "add" => {
                let (name, price) = match rest.rsplit_once(char::is_whitespace) {
                    Some((name, price)) => (name.trim(), price),
                    None => (rest, ""),
                };
                Command::Add {
                    name: name.to_string(),
                    price: price.to_string(),
                }
            }
            "remove" | "rm" => Command::Remove(parse_position("remove", rest)?),
            "up" => Command::MoveUp(parse_position("up", rest)?),
            "down" => Command::MoveDown(parse_position("down", rest)?),
            "tick" | "toggle" => Command::Toggle(parse_position("tick", rest)?),
            "email" => Command::Email,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(command)
    }
}

fn parse_position(command: &'static str, arg: &str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingPosition(command));
    }
    match arg.parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(CommandError::BadPosition(arg.to_string())),
    }
}

/// What the caller should do after a line was handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Continue(Vec<String>),
    Quit,
}

pub struct InputHandler;

impl InputHandler {
    /// Runs one line of input against the app.
    ///
    /// Notifications raised by the command follow its own output, each
    /// prefixed with `!`.
    pub fn handle_line<S: SnapshotStore>(app: &mut App<S>, line: &str) -> Outcome {
        let mut output = match Command::parse(line) {
            Ok(Command::Quit) => return Outcome::Quit,
            Ok(command) => Self::execute(app, command),
            Err(e) => vec![e.to_string()],
        };
        output.extend(
            app.take_notifications()
                .into_iter()
                .map(|notification| format!("! {notification}")),
        );
        Outcome::Continue(output)
    }

    fn execute<S: SnapshotStore>(app: &mut App<S>, command: Command) -> Vec<String> {
        match command {
            Command::Empty | Command::Quit => Vec::new(),
            Command::Help => help_lines(),
            Command::List => render_list(app),
            Command::Total => render_total(app),
            Command::SetName(name) => {
                app.set_pending_name(name);
                Vec::new()
            }
            Command::SetPrice(price) => {
                app.set_pending_price(price);
                Vec::new()
            }
            Command::Submit => Self::added(app.submit().is_ok(), app),
            Command::Add { name, price } => {
                app.set_pending_name(name);
                app.set_pending_price(price);
                Self::added(app.submit().is_ok(), app)
            }
            Command::Remove(position) => match app.remove_at(position) {
                Some(item) => vec![format!("Removed {}", item.name)],
                None => Self::no_item(position),
            },
            Command::MoveUp(position) => Self::moved(app.move_up_at(position), app),
            Command::MoveDown(position) => Self::moved(app.move_down_at(position), app),
            Command::Toggle(position) => match app.toggle_selected_at(position) {
                Some(_) => render_list(app),
                None => Self::no_item(position),
            },
            Command::Email => match app.email_link() {
                Some(link) => vec![link],
                None => vec!["Add some items before emailing the list".to_string()],
            },
        }
    }

    fn added<S: SnapshotStore>(ok: bool, app: &App<S>) -> Vec<String> {
        if ok { render_list(app) } else { Vec::new() }
    }

    fn moved<S: SnapshotStore>(moved: bool, app: &App<S>) -> Vec<String> {
        if moved {
            render_list(app)
        } else {
            vec!["Nothing to move".to_string()]
        }
    }

    fn no_item(position: usize) -> Vec<String> {
        vec![format!("There is no item {}", position + 1)]
    }
}
