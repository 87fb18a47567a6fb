// SPDX-License-Identifier: GPL-3.0

use crate::Error;
use subxt_signer::{SecretUri, sr25519::Keypair};

/// Create a keypair from a secret URI, e.g. `//Alice` on development chains.
///
/// # Arguments
/// `suri` - Secret URI string used to generate the `Keypair`.
pub fn create_signer(suri: &str) -> Result<Keypair, Error> {
	let uri = <SecretUri as std::str::FromStr>::from_str(suri)
		.map_err(|e| Error::ParseSecretURI(format!("{}", e)))?;
	Keypair::from_uri(&uri).map_err(|e| Error::KeyPairCreation(format!("{}", e)))
}
