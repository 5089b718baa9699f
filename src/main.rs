// CLI composition root: generates the key material once, runs one boundary
// operation and prints its JSON envelope. Stands in for the HTTP layer.

use std::env;

use anyhow::{bail, Result};
use crypto_service::cert::{generate_certificate, CertificateRequest};
use crypto_service::service::CryptoService;

const USAGE: &str = "usage:
  crypto-service encrypt <rsa|elgamal> <message>
  crypto-service decrypt <rsa|elgamal> <cipher-text>
  crypto-service sign <rsa|elgamal> <message>
  crypto-service verify_signature <rsa|elgamal> <message> <signature>
  crypto-service generate-certificate <common-name> <country> <state> \\
      <locality> <organization> <organizational-unit> <email>";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let Some(operation) = args.first() else {
        bail!("{}", USAGE);
    };

    // Certificate issuance does not need the engines' key material
    if operation == "generate-certificate" {
        let [_, common_name, country, state, locality, organization, organizational_unit, email] =
            args.as_slice()
        else {
            bail!("{}", USAGE);
        };
        let response = generate_certificate(&CertificateRequest {
            common_name: common_name.clone(),
            country: country.clone(),
            state: state.clone(),
            locality: locality.clone(),
            organization: organization.clone(),
            organizational_unit: organizational_unit.clone(),
            email: email.clone(),
        })?;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let service = CryptoService::new()?;

    match (operation.as_str(), &args[1..]) {
        ("encrypt", [algorithm, message]) => {
            let response = service.encrypt(algorithm, message)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        ("decrypt", [algorithm, cipher_text]) => {
            let response = service.decrypt(algorithm, cipher_text)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        ("sign", [algorithm, message]) => {
            let response = service.sign(algorithm, message)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        ("verify_signature", [algorithm, message, signature]) => {
            let response = service.verify_signature(algorithm, message, signature)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}
