#![allow(unused_macros, dead_code)]
macro_rules! verbose_println {
    ($($p:expr),+) => {
        if (config::ARGS.verbose) {
            println!($($p),+);
        }
    }
}
// Explicit carriage returns keep the output aligned when stdout is a raw terminal.
macro_rules! info {
    ($($p:expr),+) => {
        println!(concat!(blue!("INFO"),": {}\r"),format_args!($($p),+))
    }
}

macro_rules! warn {
    ($($p:expr),+) => {
        println!(concat!(red!("WARNING"),": {}\r"),format_args!($($p),+))
    }
}
macro_rules! general_err {
    ($msg:expr) => {
        Error::new(crate::ErrorKind::General, None, format!("{}", $msg).as_str())
    };
}
macro_rules! hex_err {
    ($line:expr, $msg:expr) => {
        Error::new(
            crate::ErrorKind::HexFormat,
            None,
            format!("{}, line {}: {}", red!("Hex Error"), $line, $msg).as_str(),
        )
    };
}
macro_rules! truncated_err {
    ($addr:expr,$($msg:expr),*) => {
        Error::new(
            crate::ErrorKind::Truncated,
            Some($addr),
            format!("{} {}", red!("Truncated Instruction"), format!($($msg),*)).as_str(),
        )
    };
}
macro_rules! color {
    ($color: literal, $msg: expr) => {
        concat!("\x1b[", $color, "m", $msg, "\x1b[0m")
    };
}
macro_rules! red {
    ($msg:expr) => {
        color!(91, $msg)
    };
}
macro_rules! blue {
    ($msg:expr) => {
        color!(94, $msg)
    };
}
