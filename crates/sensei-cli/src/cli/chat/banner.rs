//! Welcome banner and command instructions.

use console::style;

const BANNER: &str = r#"
   _____                      _    __  __
  / ___/___  ____  ________  (_)  / / / /___ __  __
  \__ \/ _ \/ __ \/ ___/ _ \/ /  / /_/ / __ `/ |/_/
 ___/ /  __/ / / (__  )  __/ /  / __  / /_/ />  <
/____/\___/_/ /_/____/\___/_/  /_/ /_/\__,_/_/|_|
"#;

/// How to talk to the sensei.
pub const INSTRUCTIONS: [&str; 6] = [
    "You can interact with the AI by typing your messages.",
    "Here are some commands you can use:",
    "  - Type 'newchat' to start a new conversation.",
    "  - Type 'exit' to end the conversation.",
    "  - Type 'multiline' to switch to multiline input mode. Send your multiline input with 'END'.",
    "Feel free to ask anything or start a new conversation.",
];

/// Print the banner followed by the command instructions.
pub fn print_welcome_banner() {
    println!("{}", style(BANNER).blue().bold());
    for line in INSTRUCTIONS {
        println!("{}", style(line).cyan().bold());
    }
    println!();
}
