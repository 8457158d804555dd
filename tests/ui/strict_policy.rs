use persistable_bitmap::{Bitmap, Config, IndexPolicy};
use std::panic;

fn main() {
    let tolerant = Bitmap::new();
    assert!(!tolerant.get(-1));

    let strict = Bitmap::with_config(Config::new().policy(IndexPolicy::Strict));
    assert!(!strict.get(5000));

    panic::set_hook(Box::new(|_| {}));
    let result = panic::catch_unwind(|| strict.get(-1));
    assert!(result.is_err());
}
