#![allow(dead_code)]

#[derive(objconf::Configurable)]
enum Mode {
    Fast,
}

fn main() {}
