use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    bundlescope completions bash > ~/.bash_completion.d/bundlescope\n\n\
                  Generate zsh completions:\n    bundlescope completions zsh > ~/.zfunc/_bundlescope\n\n\
                  Generate fish completions:\n    bundlescope completions fish > ~/.config/fish/completions/bundlescope.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
