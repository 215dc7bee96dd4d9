use std::{env, fs, process};
use pgc::parse::parse;

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = match fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };

    match parse(&filename, &input) {
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
        Ok(prog) => print!("{}", prog),
    }
}
