use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("sessionkit")
        .about("Sign in to a backend and keep the session")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .help("Backend base URL, example: https://api.example.com/api")
                .env("SESSIONKIT_API_URL")
                .global(true),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in with email and password")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new("register")
                .about("Create an account and sign in")
                .arg(
                    Arg::new("name")
                        .short('n')
                        .long("name")
                        .help("Display name (prompted when omitted)"),
                )
                .arg(email_arg()),
        )
        .subcommand(Command::new("logout").about("Forget the stored session"))
        .subcommand(
            Command::new("whoami").about("Check the stored session with the backend and print the user"),
        )
        .subcommand(
            Command::new("status").about("Print the stored session without contacting the backend"),
        )
}

fn email_arg() -> Arg {
    Arg::new("email")
        .short('e')
        .long("email")
        .help("Account email (prompted when omitted)")
}
