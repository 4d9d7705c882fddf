mod hook;
mod lifecycle;
mod support;
