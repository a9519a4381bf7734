#![allow(dead_code, unused_imports)]

pub mod mocks;

use std::{
    cell::RefCell,
    io::{self, Write},
    rc::Rc,
};

use serde_json::{json, Value};

pub use mocks::MockSink;

/// In-memory sink whose contents stay readable while a generator owns a clone.
#[derive(Clone, Default)]
pub struct SharedBuffer {
    inner: Rc<RefCell<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.borrow()).into_owned()
    }

    /// True once every other handle, i.e. the generator's, has been dropped.
    pub fn is_released(&self) -> bool {
        Rc::strong_count(&self.inner) == 1
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Two entries keyed `h`/`d`: `A=a`, `B=b`.
pub fn first_record() -> Value {
    json!([{"h": "A", "d": "a"}, {"h": "B", "d": "b"}])
}

/// Same headers as [`first_record`], second value changed to `bb`.
pub fn second_record() -> Value {
    json!([{"h": "A", "d": "a"}, {"h": "B", "d": "bb"}])
}
