use std::{env, fs::read_to_string, path::PathBuf, process, time::Instant};

use tokenizer::{display_error, lexer::lexer::tokenize};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() != 2 {
        panic!("Incorrect arguments provided!");
    }

    let file_path: &str = &args[1];
    let file_name = if file_path.contains('/') {
        file_path.split('/').last().unwrap()
    } else {
        file_path
    };

    let path = PathBuf::from(file_path);
    let file_contents = read_to_string(&path).expect("Failed to read file!");

    let start = Instant::now();
    let tokens = tokenize(file_contents, Some(String::from(file_name)));

    match tokens {
        Ok(tokens) => {
            println!("Tokenized in {:?}", start.elapsed());

            for token in &tokens {
                token.debug();
            }
        }
        Err(error) => {
            display_error(error, path);
            process::exit(1);
        }
    }
}
