//! MAC address generation for NIC devices.

use rand::Rng;

/// OUI prefix for generated addresses.
const MAC_PREFIX: [u8; 3] = [0x00, 0xa0, 0x98];

/// Generate a MAC address under the `00:a0:98` prefix.
///
/// The fourth octet is kept in `0x00..=0x7f`.
pub fn random_mac<R: Rng + ?Sized>(rng: &mut R) -> String {
    let octets = [
        MAC_PREFIX[0],
        MAC_PREFIX[1],
        MAC_PREFIX[2],
        rng.gen_range(0x00..=0x7f),
        rng.r#gen(),
        rng.r#gen(),
    ];
    octets
        .iter()
        .map(|octet| format!("{octet:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_mac_format() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            let mac = random_mac(&mut rng);
            assert!(mac.starts_with("00:a0:98:"), "{mac}");

            let parts: Vec<&str> = mac.split(':').collect();
            assert_eq!(parts.len(), 6);
            assert!(parts.iter().all(|p| p.len() == 2));
            assert!(u8::from_str_radix(parts[3], 16).unwrap() <= 0x7f);
        }
    }
}
