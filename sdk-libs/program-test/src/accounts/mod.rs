pub mod test_accounts;
