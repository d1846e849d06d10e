#![allow(dead_code)]

struct Sink;

#[objconf::setters]
impl Sink {
    #[setter]
    #[setter(name = "other")]
    fn set_value(&mut self, _value: &str) {}
}

fn main() {}
