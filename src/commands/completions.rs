use clap::{Args, CommandFactory};
use clap_complete::Shell;
use std::io;

use crate::cli::Cli;

#[derive(Debug, Clone, Args)]
pub struct CompletionsCommand {
    #[arg(value_enum, help = "Target shell for completion script")]
    pub shell: Shell,
}

impl CompletionsCommand {
    pub fn execute(self) {
        self.write_to(&mut io::stdout());
    }

    fn write_to(&self, out: &mut dyn io::Write) {
        let mut cmd = Cli::command();
        let app_name = cmd.get_name().to_string();
        clap_complete::generate(self.shell, &mut cmd, app_name, out);
    }
}
