use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::{self, Stylize};
use minicalc::{evaluate_with, tokenize, Options};

/// A calculator for one line of integer arithmetic with `+ - * /`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Reject anything left over after a complete expression.
    #[arg(long)]
    strict: bool,

    /// Print the tokens of the expression instead of evaluating it.
    #[arg(long)]
    tokens: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,

    /// Do not print the banner and prompt.
    #[arg(short, long)]
    quiet: bool,

    /// Expression to evaluate; read from stdin when omitted.
    expression: Option<String>,
}

fn banner() {
    let rule = "***********************************************";
    println!("{}", rule.blue().bold());
    println!("{}", "            Welcome to the Mini Calculator".blue().bold());
    println!("{}", rule.blue().bold());
    println!("{}", "    A simple calculator that supports".blue().bold());
    println!("{}", "    addition, subtraction, multiplication,".blue().bold());
    println!("{}", "    and division operations.".blue().bold());
    println!("{}", rule.blue().bold());
    println!("\nEnter an arithmetic expression (e.g., 3 + 5 * 2):");
    println!("-----------------------------------------------");
}

fn read_line() -> io::Result<String> {
    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    // getline semantics: drop the terminator only
    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

fn report(message: impl std::fmt::Display) -> ExitCode {
    eprintln!("{}", format!("Error: {}", message).red().bold());
    ExitCode::FAILURE
}

fn print_tokens(input: &str) -> ExitCode {
    match tokenize(input) {
        Ok(tokens) => {
            for token in tokens {
                println!("{:?}", token);
            }
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if args.no_color {
        style::force_color_output(false);
    }

    let input = match args.expression {
        Some(expression) => expression,
        None => {
            if !args.quiet {
                banner();
            }
            match read_line() {
                Ok(line) => line,
                Err(e) => return report(e),
            }
        }
    };

    if args.tokens {
        return print_tokens(&input);
    }

    let options = Options {
        strict_end_of_input: args.strict,
    };
    match evaluate_with(&input, &options) {
        Ok(result) => {
            println!("{}", format!("\nResult = {}", result).green().bold());
            ExitCode::SUCCESS
        }
        Err(e) => report(e),
    }
}
