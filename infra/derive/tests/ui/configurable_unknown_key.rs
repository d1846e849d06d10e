#![allow(dead_code)]

#[derive(objconf::Configurable)]
struct Pool {
    #[property(alias = "a")]
    size: Option<u8>,
}

fn main() {}
