#![no_main]

use citadel_courier::{Courier, CourierError, KeyPair, SharedInfo};
use libfuzzer_sys::fuzz_target;
use once_cell::sync::Lazy;

static PARTIES: Lazy<(KeyPair, KeyPair)> = Lazy::new(|| {
    let sender = KeyPair::generate().expect("entropy");
    let recipient = KeyPair::generate().expect("entropy");
    (sender, recipient)
});

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let a = (data[0] as usize) % (data.len() + 1);
    let b = if data.len() > 1 { (data[1] as usize) % (data.len() + 1) } else { 0 };
    let (i, j) = if a <= b { (a, b) } else { (b, a) };

    let blob = &data[..i];
    let aad = &data[i..j];
    let info = SharedInfo::raw(&data[j..]);

    let courier = Courier::default();
    let (sender, recipient) = &*PARTIES;

    match courier.open(recipient.private_key(), sender.public_key(), blob, aad, &info) {
        Ok(_) => panic!("forged blob accepted"),
        Err(CourierError::AuthenticationFailed) | Err(CourierError::TruncatedMessage { .. }) => {}
        Err(e) => panic!("unexpected error: {e}"),
    }
});
