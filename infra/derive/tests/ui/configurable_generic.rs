#![allow(dead_code)]

#[derive(objconf::Configurable)]
struct Holder<T> {
    value: Option<T>,
}

fn main() {}
