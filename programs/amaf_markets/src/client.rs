//! Program Client
//!
//! [`AmafClient`] pairs an RPC connection with a [`ClientConfig`] and
//! exposes the AMAF program as typed reads, quotes and transactions.
//!
//! Reads return `Ok(None)` for accounts that do not exist yet. Quotes are
//! always computed from a snapshot fetched in the same call.

use anchor_lang::solana_program::instruction::Instruction;
use anchor_lang::solana_program::pubkey::Pubkey;
use anchor_lang::{AccountDeserialize, Discriminator};
use anchor_spl::token::TokenAccount;
use solana_account_decoder::UiAccountEncoding;
use solana_client::rpc_client::RpcClient;
use solana_client::rpc_config::{RpcAccountInfoConfig, RpcProgramAccountsConfig};
use solana_client::rpc_filter::{Memcmp, RpcFilterType};
use solana_sdk::native_token::LAMPORTS_PER_SOL;
use solana_sdk::signature::{Keypair, Signature, Signer};
use solana_sdk::transaction::Transaction;
use tracing::{debug, info, warn};

use crate::amm::{self, BuyQuote, SellQuote};
use crate::errors::ClientError;
use crate::instructions::{self, CreateMarketArgs, PlaceBetArgs};
use crate::pda::PdaGenerator;
use crate::state::{Bet, ClientConfig, DailyClaimState, Market, MarketSnapshot, UserMarketsCounter};

pub type ClientResult<T> = std::result::Result<T, ClientError>;

/// Lamports requested by [`AmafClient::request_airdrop`] when none are given
pub const DEFAULT_AIRDROP_LAMPORTS: u64 = 2 * LAMPORTS_PER_SOL;

/// Typed access to a deployed AMAF program
pub struct AmafClient {
    rpc: RpcClient,
    config: ClientConfig,
    pdas: PdaGenerator,
}

impl AmafClient {
    pub fn new(config: ClientConfig) -> Self {
        let rpc = RpcClient::new_with_commitment(config.rpc_url.clone(), config.commitment_config());
        let pdas = PdaGenerator::new(config.program_id);
        debug!(rpc_url = %config.rpc_url, program_id = %config.program_id, "amaf client created");
        Self { rpc, config, pdas }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn pdas(&self) -> &PdaGenerator {
        &self.pdas
    }

    pub fn rpc(&self) -> &RpcClient {
        &self.rpc
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Fetch and decode an account, checking that `owner` owns it
    fn fetch_account<T: AccountDeserialize>(
        &self,
        address: &Pubkey,
        owner: &Pubkey,
    ) -> ClientResult<Option<T>> {
        let account = self
            .rpc
            .get_account_with_commitment(address, self.config.commitment_config())?
            .value;

        let Some(account) = account else {
            debug!(%address, "account not found");
            return Ok(None);
        };

        if account.owner != *owner {
            warn!(%address, owner = %account.owner, expected = %owner, "unexpected account owner");
            return Err(anchor_lang::error::Error::from(
                anchor_lang::error::ErrorCode::AccountOwnedByWrongProgram,
            )
            .with_pubkeys((account.owner, *owner))
            .into());
        }

        Ok(Some(T::try_deserialize(&mut account.data.as_slice())?))
    }

    fn fetch_program_account<T: AccountDeserialize>(&self, address: &Pubkey) -> ClientResult<Option<T>> {
        self.fetch_account(address, &self.config.program_id)
    }

    pub fn fetch_market(&self, market: &Pubkey) -> ClientResult<Option<Market>> {
        self.fetch_program_account(market)
    }

    /// Every market account of the program.
    ///
    /// Accounts that carry the market discriminator but fail to decode are
    /// skipped with a warning.
    pub fn fetch_markets(&self) -> ClientResult<Vec<(Pubkey, Market)>> {
        let config = RpcProgramAccountsConfig {
            filters: Some(vec![RpcFilterType::Memcmp(Memcmp::new_raw_bytes(
                0,
                Market::DISCRIMINATOR.to_vec(),
            ))]),
            account_config: RpcAccountInfoConfig {
                encoding: Some(UiAccountEncoding::Base64),
                commitment: Some(self.config.commitment_config()),
                ..RpcAccountInfoConfig::default()
            },
            ..RpcProgramAccountsConfig::default()
        };

        let accounts = self
            .rpc
            .get_program_accounts_with_config(&self.config.program_id, config)?;
        debug!(count = accounts.len(), "fetched market accounts");

        let markets = accounts
            .into_iter()
            .filter_map(|(address, account)| {
                match Market::try_deserialize(&mut account.data.as_slice()) {
                    Ok(market) => Some((address, market)),
                    Err(e) => {
                        warn!(%address, error = %e, "skipping undecodable market account");
                        None
                    }
                }
            })
            .collect();

        Ok(markets)
    }

    pub fn fetch_bet(&self, market: &Pubkey, user: &Pubkey) -> ClientResult<Option<Bet>> {
        let (bet, _) = self.pdas.bet(market, user);
        self.fetch_program_account(&bet)
    }

    pub fn fetch_claim_state(&self, user: &Pubkey) -> ClientResult<Option<DailyClaimState>> {
        let (claim_state, _) = self.pdas.claim_state(user);
        self.fetch_program_account(&claim_state)
    }

    pub fn fetch_user_markets_counter(&self, authority: &Pubkey) -> ClientResult<Option<UserMarketsCounter>> {
        let (counter, _) = self.pdas.user_markets_counter(authority);
        self.fetch_program_account(&counter)
    }

    /// Index the next market created by `authority` will use
    pub fn next_market_index(&self, authority: &Pubkey) -> ClientResult<u16> {
        Ok(self
            .fetch_user_markets_counter(authority)?
            .map_or(0, |counter| counter.next_market_index()))
    }

    /// Unix time at which `user` may claim from the faucet again, `None` if
    /// they never claimed
    pub fn next_claim_at(&self, user: &Pubkey) -> ClientResult<Option<i64>> {
        Ok(self
            .fetch_claim_state(user)?
            .map(|state| state.next_claim_at()))
    }

    fn account_exists(&self, address: &Pubkey) -> ClientResult<bool> {
        Ok(self
            .rpc
            .get_account_with_commitment(address, self.config.commitment_config())?
            .value
            .is_some())
    }

    /// Whether `initialize_mint` has run for the configured program
    pub fn mint_exists(&self) -> ClientResult<bool> {
        let (mint, _) = self.pdas.mint();
        let exists = self.account_exists(&mint)?;
        debug!(%mint, exists, "checked AMAF mint");
        Ok(exists)
    }

    fn token_balance(&self, token_account: &Pubkey) -> ClientResult<u64> {
        Ok(self
            .fetch_account::<TokenAccount>(token_account, &anchor_spl::token::ID)?
            .map_or(0, |account| account.amount))
    }

    /// Collateral held in escrow for `market`, in AMAF base units
    pub fn escrow_balance(&self, market: &Pubkey) -> ClientResult<u64> {
        self.token_balance(&self.pdas.escrow_token_account(market))
    }

    /// AMAF held by `owner`, in base units
    pub fn amaf_balance(&self, owner: &Pubkey) -> ClientResult<u64> {
        self.token_balance(&self.pdas.user_token_account(owner))
    }

    /// SOL held by `owner`, in lamports
    pub fn sol_balance(&self, owner: &Pubkey) -> ClientResult<u64> {
        Ok(self.rpc.get_balance(owner)?)
    }

    // ------------------------------------------------------------------
    // Quotes
    // ------------------------------------------------------------------

    /// Current pricing view of `market`
    pub fn market_snapshot(&self, market: &Pubkey) -> ClientResult<MarketSnapshot> {
        let state = self
            .fetch_market(market)?
            .ok_or(ClientError::AccountNotFound(*market))?;
        let collateral = self.escrow_balance(market)?;
        Ok(state.snapshot(collateral, &self.config.pricing))
    }

    pub fn quote_buy(&self, market: &Pubkey, option_index: usize, shares: u64) -> ClientResult<BuyQuote> {
        let snapshot = self.market_snapshot(market)?;
        Ok(amm::quote_buy(&snapshot, &self.config.pricing, option_index, shares)?)
    }

    pub fn quote_sell(
        &self,
        market: &Pubkey,
        option_index: usize,
        shares: u64,
        owned_shares: u64,
    ) -> ClientResult<SellQuote> {
        let snapshot = self.market_snapshot(market)?;
        Ok(amm::quote_sell(
            &snapshot,
            &self.config.pricing,
            option_index,
            shares,
            owned_shares,
        )?)
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Sign `instructions` with `payer`, send them and wait for confirmation
    pub fn send_instructions(&self, payer: &Keypair, instructions: &[Instruction]) -> ClientResult<Signature> {
        let blockhash = self.rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            instructions,
            Some(&payer.pubkey()),
            &[payer],
            blockhash,
        );

        let signature = self.rpc.send_and_confirm_transaction(&transaction)?;
        info!(%signature, payer = %payer.pubkey(), "transaction confirmed");
        Ok(signature)
    }

    /// Prefix `instruction` with the creation of `owner`'s AMAF token
    /// account if it does not exist yet
    fn with_user_token_account(
        &self,
        owner: &Pubkey,
        instruction: Instruction,
    ) -> ClientResult<Vec<Instruction>> {
        let mut ixs = Vec::with_capacity(2);
        let token_account = self.pdas.user_token_account(owner);
        if !self.account_exists(&token_account)? {
            debug!(%owner, %token_account, "creating AMAF token account");
            ixs.push(instructions::create_user_token_account(&self.pdas, owner, owner));
        }
        ixs.push(instruction);
        Ok(ixs)
    }

    pub fn initialize_mint(&self, payer: &Keypair) -> ClientResult<Signature> {
        let ix = instructions::initialize_mint(&self.pdas, &payer.pubkey())?;
        self.send_instructions(payer, &[ix])
    }

    /// Create a market at the authority's next index
    pub fn create_market(
        &self,
        authority: &Keypair,
        question: impl Into<String>,
        description: impl Into<String>,
    ) -> ClientResult<(Pubkey, Signature)> {
        let market_index = self.next_market_index(&authority.pubkey())?;
        let ix = instructions::create_market(
            &self.pdas,
            &authority.pubkey(),
            CreateMarketArgs {
                market_index,
                question: question.into(),
                description: description.into(),
            },
        )?;
        let (market, _) = self.pdas.market(&authority.pubkey(), market_index);

        let signature = self.send_instructions(authority, &[ix])?;
        info!(%market, market_index, "market created");
        Ok((market, signature))
    }

    pub fn place_bet(
        &self,
        user: &Keypair,
        market: &Pubkey,
        amount: u64,
        side_yes: bool,
    ) -> ClientResult<Signature> {
        let ix = instructions::place_bet(
            &self.pdas,
            market,
            &user.pubkey(),
            PlaceBetArgs { amount, side_yes },
        )?;
        let mut ixs = self.with_user_token_account(&user.pubkey(), ix)?;

        // The first bet on a market pays for its collateral account
        let escrow_token = self.pdas.escrow_token_account(market);
        if !self.account_exists(&escrow_token)? {
            debug!(%market, %escrow_token, "creating market escrow account");
            ixs.insert(
                0,
                instructions::create_escrow_token_account(&self.pdas, &user.pubkey(), market),
            );
        }

        self.send_instructions(user, &ixs)
    }

    pub fn resolve_market(&self, authority: &Keypair, market: &Pubkey, outcome_yes: bool) -> ClientResult<Signature> {
        let ix = instructions::resolve_market(&self.pdas, market, &authority.pubkey(), outcome_yes)?;
        self.send_instructions(authority, &[ix])
    }

    pub fn cancel_market(&self, authority: &Keypair, market: &Pubkey) -> ClientResult<Signature> {
        let ix = instructions::cancel_market(&self.pdas, market, &authority.pubkey())?;
        self.send_instructions(authority, &[ix])
    }

    pub fn claim_payout(&self, user: &Keypair, market: &Pubkey) -> ClientResult<Signature> {
        let ix = instructions::claim_payout(&self.pdas, market, &user.pubkey())?;
        let ixs = self.with_user_token_account(&user.pubkey(), ix)?;
        self.send_instructions(user, &ixs)
    }

    pub fn claim_daily_amaf(&self, user: &Keypair) -> ClientResult<Signature> {
        let ix = instructions::claim_daily_amaf(&self.pdas, &user.pubkey())?;
        let ixs = self.with_user_token_account(&user.pubkey(), ix)?;
        self.send_instructions(user, &ixs)
    }

    /// Request devnet/localnet SOL and wait until it lands
    pub fn request_airdrop(&self, recipient: &Pubkey, lamports: Option<u64>) -> ClientResult<Signature> {
        let lamports = lamports.unwrap_or(DEFAULT_AIRDROP_LAMPORTS);
        let signature = self.rpc.request_airdrop(recipient, lamports)?;
        self.rpc.poll_for_signature(&signature)?;
        info!(%recipient, lamports, %signature, "airdrop confirmed");
        Ok(signature)
    }
}
