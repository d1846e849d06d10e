#![allow(dead_code)]

struct Sink;

trait Named {}

#[objconf::setters]
impl Named for Sink {}

fn main() {}
