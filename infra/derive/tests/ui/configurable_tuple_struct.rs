#![allow(dead_code)]

#[derive(objconf::Configurable)]
struct Port(u16);

fn main() {}
