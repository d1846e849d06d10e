#![allow(dead_code)]

struct Base;

#[derive(objconf::Configurable)]
struct Twice {
    #[configurable(parent)] first: Base,
    #[configurable(parent)] second: Base,
}

fn main() {}
