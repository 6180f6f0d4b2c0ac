use console::style;
use cytogate_core::CytogateError;
use std::fmt;

/// Error with remediation hints, rendered on stderr
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn session_not_found(name: &str) -> CliError {
    CliError::new(format!("Session not found: {}", name))
        .with_context("No session with this name exists in the session store.")
        .with_suggestion("List saved sessions: cytogate sessions")
        .with_suggestion("Or import measurements: cytogate import data.csv --session NAME")
        .with_help("Run: cytogate import --help")
}

pub fn session_exists(name: &str) -> CliError {
    CliError::new(format!("Session already exists: {}", name))
        .with_suggestion("Pick another name with --session")
        .with_suggestion("Or overwrite it with --force")
}

pub fn gate_not_found(name: &str) -> CliError {
    CliError::new(format!("Gate not found: {}", name))
        .with_context("Gates are consumed when they are used for dyeing.")
        .with_suggestion("List the session's gates: cytogate show --session NAME")
}

pub fn gate_not_closed(clicks: usize) -> CliError {
    CliError::new("Gate ring was not closed")
        .with_context(format!(
            "Replayed {} clicks but the last one did not land near the first vertex.",
            clicks
        ))
        .with_suggestion("End with a click within the closure threshold of the first click")
        .with_suggestion("A gate needs at least three distinct vertices")
        .with_help("Run: cytogate gate --help")
}

pub fn missing_column(column: &str) -> CliError {
    CliError::new(format!("Measurement column missing: {}", column))
        .with_suggestion("Check the CSV header row")
        .with_suggestion("Or map columns with --column-a, --column-b and --column-y")
        .with_help("Run: cytogate import --help")
}

pub fn name_required() -> CliError {
    CliError::new("Gate name required")
        .with_context("No --name was given and the terminal is not interactive.")
        .with_suggestion("Pass a name: --name NAME")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    if let Some(cli_error) = error.downcast_ref::<CliError>() {
        return CliError {
            message: cli_error.message.clone(),
            context: cli_error.context.clone(),
            suggestions: cli_error.suggestions.clone(),
            help_command: cli_error.help_command.clone(),
        };
    }

    match error.downcast_ref::<CytogateError>() {
        Some(CytogateError::SessionNotFound { name }) => session_not_found(name),
        Some(CytogateError::GateNotFound { name }) => gate_not_found(name),
        Some(CytogateError::MissingColumn { column }) => missing_column(column),
        Some(CytogateError::CorruptStore { reason }) => CliError::new("Session store is corrupt")
            .with_context(format!("Error: {}", reason))
            .with_suggestion("Point --store at another file")
            .with_suggestion("Or restore the store file from a backup"),
        _ => {
            let message = format!("{:#}", error);
            if message.contains("No such file or directory") {
                CliError::new("File not found")
                    .with_context(format!("Error: {}", message))
                    .with_suggestion("Check the file path and try again")
            } else {
                CliError::new(message)
            }
        }
    }
}
