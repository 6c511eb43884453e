//! `cli-exec` service: run exec-level CLI commands, optionally answering
//! interactive prompts through expect/reply dialogs.
//!
//! Returning output in XML-PI format is not supported.

use crate::error::{PnpError, Result};
use crate::services::{require_commands, Details, CLI_EXEC_NAMESPACE};
use crate::xml::Element;

/// One expect/reply interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub expect: String,
    pub reply: String,
    /// Match mode of the `expect` text.
    pub match_mode: String,
    pub case_sensitive: bool,
    pub repeat: u32,
}

impl Dialog {
    /// Dialog with exact, case-sensitive matching that fires once.
    pub fn new(expect: impl Into<String>, reply: impl Into<String>) -> Self {
        Self {
            expect: expect.into(),
            reply: reply.into(),
            match_mode: "exact".into(),
            case_sensitive: true,
            repeat: 1,
        }
    }

    pub fn match_mode(mut self, mode: impl Into<String>) -> Self {
        self.match_mode = mode.into();
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }

    fn to_element(&self) -> Element {
        let expect = Element::new("expect")
            .with_attr("match", self.match_mode.as_str())
            .with_attr("caseSensitive", if self.case_sensitive { "True" } else { "False" })
            .with_text(self.expect.as_str());
        Element::new("dialog")
            .with_attr("repeat", self.repeat.to_string())
            .with_child(expect)
            .with_child(Element::leaf("reply", self.reply.as_str()))
    }
}

/// A plain command or a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecCommand {
    Cmd(String),
    Dialog(Dialog),
}

impl From<&str> for ExecCommand {
    fn from(cmd: &str) -> Self {
        ExecCommand::Cmd(cmd.to_owned())
    }
}

impl From<String> for ExecCommand {
    fn from(cmd: String) -> Self {
        ExecCommand::Cmd(cmd)
    }
}

impl From<(&str, &str)> for ExecCommand {
    fn from((expect, reply): (&str, &str)) -> Self {
        ExecCommand::Dialog(Dialog::new(expect, reply))
    }
}

impl From<Dialog> for ExecCommand {
    fn from(dialog: Dialog) -> Self {
        ExecCommand::Dialog(dialog)
    }
}

/// Parameters of a cli-exec request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliExec {
    pub commands: Vec<ExecCommand>,
    pub details: Details,
    /// Seconds, sent as `PT<n>S`.
    pub max_wait: u32,
    /// Bytes; 0 leaves the limit to the agent.
    pub max_response_size: u32,
    /// Syntax-check only (`execTest`); plain commands only.
    pub check: bool,
}

impl CliExec {
    /// Defaults: all details, 10 s wait, no response size limit.
    pub fn new<I, C>(commands: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ExecCommand>,
    {
        Self {
            commands: commands.into_iter().map(Into::into).collect(),
            details: Details::All,
            max_wait: 10,
            max_response_size: 0,
            check: false,
        }
    }

    pub fn details(mut self, details: Details) -> Self {
        self.details = details;
        self
    }

    pub fn max_wait(mut self, seconds: u32) -> Self {
        self.max_wait = seconds;
        self
    }

    pub fn max_response_size(mut self, bytes: u32) -> Self {
        self.max_response_size = bytes;
        self
    }

    pub fn check(mut self, check: bool) -> Self {
        self.check = check;
        self
    }

    pub fn build(&self) -> Result<Element> {
        cli_exec(self)
    }
}

/// Build a cli-exec request body.
pub fn cli_exec(params: &CliExec) -> Result<Element> {
    require_commands("cli-exec", &params.commands)?;

    let action = if params.check {
        let cmds = params
            .commands
            .iter()
            .map(|cmd| match cmd {
                ExecCommand::Cmd(cmd) => Ok(Element::leaf("cmd", cmd.as_str())),
                ExecCommand::Dialog(dialog) => Err(PnpError::invalid_args(format!(
                    "cli-exec syntax check takes plain commands only, got dialog {:?}",
                    dialog.expect
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Element::new("execTest")
            .with_attr("details", params.details.as_str())
            .with_child(
                Element::new("exec-data")
                    .with_child(Element::new("cli-exec-data").with_children(cmds)),
            )
    } else {
        Element::new("execCLI")
            .with_attr("maxWait", format!("PT{}S", params.max_wait))
            .with_attr("maxResponseSize", params.max_response_size.to_string())
            .with_children(params.commands.iter().map(|cmd| match cmd {
                ExecCommand::Cmd(cmd) => Element::leaf("cmd", cmd.as_str()),
                ExecCommand::Dialog(dialog) => dialog.to_element(),
            }))
    };

    Ok(Element::namespaced(CLI_EXEC_NAMESPACE, "request").with_child(action))
}
