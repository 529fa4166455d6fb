mod common;

mod check;
