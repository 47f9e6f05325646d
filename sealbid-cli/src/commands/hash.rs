use clap::Subcommand;
use comfy_table::{presets::UTF8_FULL, Table};
use rand::RngCore;
use sealbid_core::commitment::{
    concatenate_commitment, generate_hash, is_sha256_hex, verify_hash, SEPARATOR,
};
use sealbid_core::{Decimal, Result, SealBidError};
use uuid::Uuid;

#[derive(Subcommand)]
pub enum HashCommands {
    /// Seal a bid: concatenate item/bid/nonce/salt and hash it
    Generate {
        /// Item the bid is for
        #[arg(long)]
        item: String,
        /// Bid amount (positive decimal; must be revealed exactly as sealed)
        #[arg(long)]
        bid: String,
        /// Commitment nonce; autogenerated when omitted
        #[arg(long)]
        nonce: Option<String>,
        /// Salt; random hex autogenerated when omitted
        #[arg(long)]
        salt: Option<String>,
    },
    /// Check a claimed digest against the sealed fields
    Verify {
        /// The claimed SHA-256 hex digest
        #[arg(long)]
        hash: String,
        #[arg(long)]
        item: String,
        #[arg(long)]
        bid: String,
        #[arg(long)]
        nonce: String,
        #[arg(long)]
        salt: String,
    },
}

pub fn handle_hash_command(cmd: HashCommands) -> Result<()> {
    match cmd {
        HashCommands::Generate {
            item,
            bid,
            nonce,
            salt,
        } => {
            let bid = parse_bid(&bid)?;
            let nonce = nonce.unwrap_or_else(|| Uuid::new_v4().to_string());
            let salt = salt.unwrap_or_else(random_salt);
            check_sealed_fields(&item, &nonce, &salt)?;

            let hash = generate_hash(&concatenate_commitment(&item, &bid, &nonce, &salt));

            println!("Sealed bid:");
            let mut table = Table::new();
            table.load_preset(UTF8_FULL);
            table.set_header(vec!["Field", "Value"]);
            table.add_row(vec!["hash", &hash]);
            table.add_row(vec!["nonce", &nonce]);
            table.add_row(vec!["salt", &salt]);
            println!("{}", table);
            println!("Commit with: sealbid submission commit --collection <c> --hash {} --nonce {}", hash, nonce);
            println!("Keep the bid, nonce, and salt private until reveal.");
        }

        HashCommands::Verify {
            hash,
            item,
            bid,
            nonce,
            salt,
        } => {
            let bid = parse_bid(&bid)?;
            if !is_sha256_hex(&hash) {
                return Err(SealBidError::validation(
                    "hash must be a 64-character lowercase hex SHA-256 digest",
                ));
            }

            if verify_hash(&hash, &item, &bid, &nonce, &salt) {
                println!("OK: fields hash to the given digest");
            } else {
                let recomputed = generate_hash(&concatenate_commitment(&item, &bid, &nonce, &salt));
                println!("MISMATCH: fields hash to {}", recomputed);
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn parse_bid(raw: &str) -> Result<Decimal> {
    let bid: Decimal = raw
        .parse()
        .map_err(|_| SealBidError::validation(format!("bid is not a decimal number: {}", raw)))?;
    if bid <= Decimal::ZERO {
        return Err(SealBidError::validation(format!(
            "bid must be positive, got {}",
            bid
        )));
    }
    Ok(bid)
}

fn check_sealed_fields(item: &str, nonce: &str, salt: &str) -> Result<()> {
    for (field, value) in [("item", item), ("nonce", nonce), ("salt", salt)] {
        if value.contains(SEPARATOR) {
            return Err(SealBidError::validation(format!(
                "{} must not contain '{}'",
                field, SEPARATOR
            )));
        }
    }
    Ok(())
}

fn random_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bid_rejects_zero_and_garbage() {
        assert!(parse_bid("100").is_ok());
        assert!(parse_bid("0").is_err());
        assert!(parse_bid("-5").is_err());
        assert!(parse_bid("abc").is_err());
    }

    #[test]
    fn test_random_salt_is_hex() {
        let salt = random_salt();
        assert_eq!(salt.len(), 32);
        assert!(hex::decode(&salt).is_ok());
    }

    #[test]
    fn test_sealed_fields_reject_separator() {
        assert!(check_sealed_fields("item", "nonce", "salt").is_ok());
        assert!(check_sealed_fields("a/b", "nonce", "salt").is_err());
    }
}
