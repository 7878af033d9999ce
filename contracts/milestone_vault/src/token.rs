use soroban_sdk::{token, Address, Env};

/// Moves `amount` of `token` between two accounts. Traps the whole
/// invocation if the token contract rejects the transfer.
pub fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: &i128) {
    token::Client::new(env, token).transfer(from, to, amount);
}

pub fn balance(env: &Env, token: &Address, account: &Address) -> i128 {
    token::Client::new(env, token).balance(account)
}
