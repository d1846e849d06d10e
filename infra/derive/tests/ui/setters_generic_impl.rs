#![allow(dead_code)]

struct Sink<T>(T);

#[objconf::setters]
impl<T> Sink<T> {}

fn main() {}
