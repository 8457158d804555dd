use persistable_bitmap::Bitmap;

fn main() {
    let mut bitmap = Bitmap::new();
    bitmap
        .set(0)
        .set(130)
        .set_range(10, 13)
        .unset(11)
        .fill_range(20, 22, true)
        .unset_range(21, 21);

    assert_eq!(bitmap.to_offsets(), [0, 10, 12, 13, 20, 22, 130]);
    assert_eq!(bitmap.byte_len(), 32);
    assert_eq!(bitmap.count(), 7);
}
