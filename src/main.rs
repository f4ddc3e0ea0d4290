use std::io::{self, BufRead, Write};

use omnicalc::Calculator;

/// Line-oriented front end for the evaluation engine. Every line is run
/// through the same pure state transitions a keypad UI would use; `history`
/// lists past calculations, `clear` wipes them, `quit` exits.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut stdout = io::stdout();
    let stdin = io::stdin();
    let mut buffer = String::new();
    let mut state = Calculator::new();

    loop {
        stdout.write_all("> ".as_bytes())?;
        stdout.flush()?;
        buffer.clear();
        if stdin.lock().read_line(&mut buffer)? == 0 {
            break;
        }
        let line = buffer.trim();
        match line {
            "" => continue,
            "quit" | "exit" => break,
            "history" => {
                for item in &state.history {
                    println!("{} = {}", item.expression, item.result);
                }
            }
            "clear" => {
                state = state.clear_history().clear();
            }
            _ => {
                state = state.clear().apply_input(line).calculate();
                if state.is_error {
                    log::warn!("could not evaluate '{}'", line);
                    eprintln!("Error");
                } else {
                    println!("{}", state.result);
                }
            }
        }
    }
    Ok(())
}
