use persistable_bitmap::{Bitmap, DecodeError};

fn main() {
    let a: Bitmap = "800000111122224444888801".parse().unwrap();
    let b = Bitmap::from_persisted("808421842184218421842101").unwrap();

    assert_eq!((&a & &b).to_string(), "800000000100200400800001");
    assert_eq!((&a | &b).to_persistable(), (&b | &a).to_persistable());
    assert_eq!((&a ^ &b).byte_len(), 12);

    let mut c = a.clone();
    c |= &b;
    assert_eq!(c, a.or(&b));

    let restored = Bitmap::from_persisted(&c.to_persistable()).unwrap();
    assert_eq!(restored.to_offsets(), c.to_offsets());

    match Bitmap::from_persisted("zz") {
        Err(DecodeError::InvalidDigit { index, found }) => {
            assert_eq!(index, 0);
            assert_eq!(found, 'z');
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
