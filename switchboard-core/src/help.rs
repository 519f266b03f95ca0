//! Help rendering.
//!
//! The dispatcher builds a [`HelpRequest`] and hands it to a [`HelpRenderer`].
//! [`LinearHelpRenderer`] prints an indented listing for terminals and
//! [`JsonHelpRenderer`] emits the request itself as JSON.

use std::fmt::Write;

use ansi_term::Colour::{Blue, Cyan, Yellow};
use ansi_term::Style;
use serde::{Deserialize, Serialize};

use crate::config::AppInfo;
use crate::descriptor::{CommandDescriptor, FieldDescriptor};
use crate::error::RenderError;

const INDENT: &str = "    ";
const SEPARATOR: &str = " - ";

/// Everything a renderer needs to describe the available commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelpRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app: Option<AppInfo>,
    pub commands: Vec<CommandDescriptor>,
    /// When set, only this command is described
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<CommandDescriptor>,
    pub help_tokens: Vec<String>,
    pub quit_tokens: Vec<String>,
}

pub trait HelpRenderer: Send + Sync {
    fn render(&self, request: &HelpRequest) -> Result<String, RenderError>;
}

/// Plain indented listing, optionally colored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearHelpRenderer {
    color: bool,
}

impl LinearHelpRenderer {
    pub fn new() -> Self {
        Self { color: false }
    }

    pub fn colored(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn paint(&self, style: Style, text: &str) -> String {
        if self.color {
            style.paint(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn render_header(&self, app: &AppInfo, out: &mut String) -> Result<(), RenderError> {
        write!(out, "\n{}", self.paint(Blue.bold(), &app.name))?;
        if let Some(version) = &app.version {
            write!(out, " {}", self.paint(Style::new().dimmed(), &format!("v{}", version)))?;
        }
        writeln!(out)?;

        if let Some(description) = &app.description {
            writeln!(out, "{}", description)?;
        }

        let contact: Vec<&str> = [&app.author, &app.support_email, &app.website]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect();
        if !contact.is_empty() {
            writeln!(out, "{}", self.paint(Style::new().dimmed(), &contact.join(" | ")))?;
        }

        Ok(())
    }

    fn render_command(
        &self,
        command: &CommandDescriptor,
        out: &mut String,
    ) -> Result<(), RenderError> {
        let mut names = self.paint(Cyan.bold(), &command.name);
        if let Some(short) = command.short() {
            names.push_str(", ");
            names.push_str(&self.paint(Cyan.normal(), short));
        }
        writeln!(out, "{}{}{}{}", INDENT, names, SEPARATOR, command.description)?;

        let mut flags: Vec<&FieldDescriptor> = command.flags().collect();
        let mut parameters: Vec<&FieldDescriptor> = command.parameters().collect();
        flags.sort_by(|a, b| a.name.cmp(&b.name));
        parameters.sort_by(|a, b| a.name.cmp(&b.name));

        self.render_fields("Flags:", &flags, out)?;
        self.render_fields("Parameters:", &parameters, out)
    }

    fn render_fields(
        &self,
        title: &str,
        fields: &[&FieldDescriptor],
        out: &mut String,
    ) -> Result<(), RenderError> {
        if fields.is_empty() {
            return Ok(());
        }

        writeln!(out, "{}{}", INDENT.repeat(2), self.paint(Yellow.normal(), title))?;
        for field in fields {
            let mut line = INDENT.repeat(3);
            if let Some(short) = field.short() {
                line.push_str(&format!("-{}, ", short));
            }
            line.push_str(&self.paint(Yellow.normal(), &format!("--{}", field.name)));
            line.push_str(INDENT);
            line.push_str(&field.description);
            if field.is_required() {
                line.push(' ');
                line.push_str(&self.paint(Style::new().dimmed(), "(required)"));
            }
            writeln!(out, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

impl HelpRenderer for LinearHelpRenderer {
    fn render(&self, request: &HelpRequest) -> Result<String, RenderError> {
        let mut out = String::new();

        if let Some(command) = &request.focus {
            self.render_command(command, &mut out)?;
            return Ok(out);
        }

        if let Some(app) = &request.app {
            self.render_header(app, &mut out)?;
        }

        let executable = request
            .app
            .as_ref()
            .and_then(|a| a.executable.as_deref())
            .map(|e| format!("{} ", e))
            .unwrap_or_default();
        writeln!(out, "\nUsage: {}<command> [options] [arguments]", executable)?;
        writeln!(out, "{}", self.paint(Blue.bold(), "===== Help ====="))?;

        for command in &request.commands {
            writeln!(out)?;
            self.render_command(command, &mut out)?;
        }

        writeln!(out)?;
        let help = token_list(&request.help_tokens);
        writeln!(out, "{}{}{}Shows this help", INDENT, help, SEPARATOR)?;
        if !request.quit_tokens.is_empty() {
            let quit = token_list(&request.quit_tokens);
            writeln!(out, "{}{}{}Exits the program", INDENT, quit, SEPARATOR)?;
        }

        Ok(out)
    }
}

/// Shortest tokens first, e.g. `q, quit, exit`.
fn token_list(tokens: &[String]) -> String {
    let mut sorted: Vec<&str> = tokens.iter().map(String::as_str).collect();
    sorted.sort_by_key(|t| t.len());
    sorted.join(", ")
}

/// Emits the request as pretty-printed JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonHelpRenderer;

impl HelpRenderer for JsonHelpRenderer {
    fn render(&self, request: &HelpRequest) -> Result<String, RenderError> {
        Ok(serde_json::to_string_pretty(request)?)
    }
}
