use clap::Parser;
use uiplan_runner::{
    execute_build, execute_diff, execute_explain, execute_generate, execute_history_list,
    execute_history_show, execute_plan, init_tracing, Cli, Commands, HistoryCommand,
};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Plan(command) => execute_plan(command),
        Commands::Generate(command) => execute_generate(command),
        Commands::Explain(command) => execute_explain(command),
        Commands::Build(command) => execute_build(command),
        Commands::Diff(command) => execute_diff(command),
        Commands::History(history_command) => match history_command {
            HistoryCommand::List(command) => execute_history_list(command),
            HistoryCommand::Show(command) => execute_history_show(command),
        },
    };

    match result {
        Ok(output) => {
            println!("{output}");
        }
        Err(error) => {
            eprintln!("{error}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
