//! Random synthesis of single account fields.

use rand::Rng;

use fraudring_common::{ACCOUNT_ID_DIGITS, ACCOUNT_ID_PREFIX};

use crate::names::{DOMAINS, FIRST_NAMES, LAST_NAMES};

fn pick<R: Rng + ?Sized>(rng: &mut R, pool: &[&'static str]) -> &'static str {
    pool[rng.random_range(0..pool.len())]
}

/// `ACC` followed by eight random digits. Uniqueness is the caller's job.
pub fn account_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut id = String::with_capacity(ACCOUNT_ID_PREFIX.len() + ACCOUNT_ID_DIGITS);
    id.push_str(ACCOUNT_ID_PREFIX);
    for _ in 0..ACCOUNT_ID_DIGITS {
        id.push(char::from(b'0' + rng.random_range(0..10u8)));
    }
    id
}

pub fn name<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    (pick(rng, FIRST_NAMES), pick(rng, LAST_NAMES))
}

/// An address derived from the name pair in one of four shapes:
/// `first.last`, `firstlast`, `flast` or `first<1-99>`.
pub fn email<R: Rng + ?Sized>(rng: &mut R, first: &str, last: &str) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();

    let local = match rng.random_range(0..4) {
        0 => format!("{first}.{last}"),
        1 => format!("{first}{last}"),
        2 => {
            let initial: String = first.chars().take(1).collect();
            format!("{initial}{last}")
        }
        _ => format!("{first}{}", rng.random_range(1..=99)),
    };

    format!("{local}@{}", pick(rng, DOMAINS))
}

/// `555-XXX-XXXX` with the exchange kept in 200-999.
pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    let exchange = rng.random_range(200..=999);
    let subscriber = rng.random_range(1000..=9999);
    format!("555-{exchange}-{subscriber}")
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn account_id_is_prefix_plus_eight_digits() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let id = account_id(&mut rng);
            assert_eq!(id.len(), 11);
            assert!(id.starts_with("ACC"));
            assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn email_uses_one_of_the_known_shapes() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let addr = email(&mut rng, "Mary", "Smith");
            let (local, domain) = addr.split_once('@').unwrap();
            assert!(DOMAINS.contains(&domain), "unexpected domain in {addr}");

            let numbered = local
                .strip_prefix("mary")
                .and_then(|rest| rest.parse::<u32>().ok())
                .is_some_and(|n| (1..=99).contains(&n));
            assert!(
                matches!(local, "mary.smith" | "marysmith" | "msmith") || numbered,
                "unexpected local part in {addr}"
            );
        }
    }

    #[test]
    fn phone_exchange_and_subscriber_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let p = phone(&mut rng);
            let parts: Vec<&str> = p.split('-').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], "555");
            let exchange: u32 = parts[1].parse().unwrap();
            let subscriber: u32 = parts[2].parse().unwrap();
            assert!((200..=999).contains(&exchange));
            assert!((1000..=9999).contains(&subscriber));
        }
    }
}
