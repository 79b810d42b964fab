use crate::shell::command::Command;
use crate::shell::line::substitute_args;
use crate::shell::session::Session;

/// Command whose body is shell text, executed in the calling session with
/// `$1`..`$9` and `$*` replaced by the invocation's arguments.
pub struct ScriptCommand {
    body: String,
}

impl ScriptCommand {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl Command for ScriptCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> anyhow::Result<()> {
        let text = substitute_args(&self.body, args);
        session.execute(&text)?;
        Ok(())
    }
}
