// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::{env, fs, process};

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = match fs::read_to_string(&filename) {
        Ok(input) => input,
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
    };

    match pgc::compile(&filename, &input) {
        Err(e) => {
            eprintln!("{}: {}", filename, e);
            process::exit(1);
        }
        Ok(gcode) => println!("{}", gcode),
    }
}
