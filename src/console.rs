//! Line-oriented operator console

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{EmergencyType, IntakeForm};
use crate::session::UiAction;

pub const HELP: &str = "\
Commands:
  open <type>                                        open the intake form (medical, fire, security, natural)
  submit <type>|<location>|<description>|<priority>  register an incident (priority: high, medium, low)
  resolve <id>                                       mark an incident as resolved
  edit <id>                                          load an incident into the intake form
  list                                               show all incidents
  dashboard                                          show the dashboard counters
  help                                               show this help
  quit                                               exit
";

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleCommand {
    Action(UiAction),
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_ascii_lowercase().as_str() {
        "open" => {
            let emergency_type = rest.parse::<EmergencyType>().map_err(|_| {
                AppError::Validation(format!("Unknown emergency type '{}'", rest))
            })?;
            ConsoleCommand::Action(UiAction::OpenForm(emergency_type))
        }
        "submit" => ConsoleCommand::Action(UiAction::Submit(parse_form(rest)?)),
        "resolve" => ConsoleCommand::Action(UiAction::Resolve(parse_id(rest)?)),
        "edit" => ConsoleCommand::Action(UiAction::LoadIntoForm(parse_id(rest)?)),
        "list" => ConsoleCommand::Action(UiAction::ShowList),
        "dashboard" => ConsoleCommand::Action(UiAction::ShowDashboard),
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => {
            return Err(AppError::Validation(format!(
                "Unknown command '{}', type 'help' for a list",
                other
            )))
        }
    };

    Ok(Some(command))
}

fn parse_form(input: &str) -> Result<IntakeForm> {
    let fields: Vec<&str> = input.split('|').map(str::trim).collect();
    match fields.as_slice() {
        [emergency_type, location, description, priority] => Ok(IntakeForm::new(
            *emergency_type,
            *location,
            *description,
            *priority,
        )),
        _ => Err(AppError::Validation(
            "Expected <type>|<location>|<description>|<priority>".to_string(),
        )),
    }
}

fn parse_id(input: &str) -> Result<Uuid> {
    Uuid::parse_str(input)
        .map_err(|e| AppError::Validation(format!("Invalid incident id '{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_submit() {
        let command = parse_command("submit fire | Main St | smoke reported | high")
            .unwrap()
            .unwrap();

        assert_eq!(
            command,
            ConsoleCommand::Action(UiAction::Submit(IntakeForm::new(
                "fire",
                "Main St",
                "smoke reported",
                "high"
            )))
        );
    }

    #[test]
    fn test_parse_open_and_resolve() {
        assert_eq!(
            parse_command("open natural").unwrap(),
            Some(ConsoleCommand::Action(UiAction::OpenForm(EmergencyType::Natural)))
        );

        let id = Uuid::now_v7();
        assert_eq!(
            parse_command(&format!("resolve {}", id)).unwrap(),
            Some(ConsoleCommand::Action(UiAction::Resolve(id)))
        );
        assert_eq!(
            parse_command(&format!("EDIT {}", id)).unwrap(),
            Some(ConsoleCommand::Action(UiAction::LoadIntoForm(id)))
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_command("   ").unwrap(), None);
        assert_eq!(parse_command("quit").unwrap(), Some(ConsoleCommand::Quit));
        assert_eq!(parse_command("help").unwrap(), Some(ConsoleCommand::Help));
        assert_eq!(
            parse_command("list").unwrap(),
            Some(ConsoleCommand::Action(UiAction::ShowList))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_command("open flood").is_err());
        assert!(parse_command("submit fire|Main St|high").is_err());
        assert!(parse_command("resolve 42").is_err());
        assert!(parse_command("launch").is_err());
    }
}
