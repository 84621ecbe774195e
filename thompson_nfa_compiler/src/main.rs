use std::process;

use clap::{arg, command, value_parser, ArgAction, ArgMatches, Command};
use thompson_nfa_compiler::{translate, Compiler, Config, Matcher};

const EXIT_ERROR: i32 = 1;

fn cli() -> Command {
    command!()
        .about("Compile a regular expression into a Thompson NFA and match strings against it")
        .long_about(
            "Patterns are made of single-character literals, `.` for \
             concatenation, `|` for alternation, `*` for repetition and \
             parentheses for grouping. Each SUBJECT is reported as a match \
             only if the pattern matches it completely.",
        )
        .arg(arg!(<PATTERN>).help("Regular expression, for example `(a|b).c*`"))
        .arg(
            arg!([SUBJECT])
                .help("Strings to match against the pattern")
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .arg(arg!(-p --postfix).help("Print the pattern in postfix order"))
        .arg(arg!(-d --dump).help("Print the states of the compiled NFA"))
        .arg(
            arg!(--"size-limit" <STATES>)
                .help("Fail if the NFA needs more than the given number of states")
                .required(false)
                .value_parser(value_parser!(usize)),
        )
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = cli().get_matches();

    if let Err(err) = run(&args) {
        eprintln!("error: {}", err);
        process::exit(EXIT_ERROR);
    }

    Ok(())
}

fn run(args: &ArgMatches) -> anyhow::Result<()> {
    let pattern = args.get_one::<String>("PATTERN").unwrap();
    let config =
        Config::new().size_limit(args.get_one::<usize>("size-limit").copied());

    let postfix = translate(pattern)?;

    if args.get_flag("postfix") {
        println!("{}", postfix);
    }

    let nfa = Compiler::with_config(config).compile(&postfix)?;

    if args.get_flag("dump") {
        print!("{}", nfa);
    }

    let matcher = Matcher::new(&nfa);

    for subject in args.get_many::<String>("SUBJECT").into_iter().flatten() {
        let verdict = if matcher.is_match(subject) { "match" } else { "no match" };
        println!("{:?}: {}", subject, verdict);
    }

    Ok(())
}
