#![allow(dead_code)]

#[derive(objconf::Configurable)]
struct Pool {
    #[property(name = "a", name = "b")]
    size: Option<u8>,
}

fn main() {}
