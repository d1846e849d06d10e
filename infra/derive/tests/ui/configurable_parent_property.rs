#![allow(dead_code)]

struct Base;

#[derive(objconf::Configurable)]
struct Both {
    #[configurable(parent)]
    #[property]
    base: Base,
}

fn main() {}
