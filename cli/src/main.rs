use anchor_lang::AccountDeserialize;
use anyhow::{anyhow, Context, Result};
use borsh::BorshSerialize;
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{read_keypair_file, Keypair, Signer};
use solana_sdk::system_program;
use solana_sdk::transaction::Transaction;
use spl_associated_token_account::get_associated_token_address_with_program_id;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tokenpass::constants::{ACTIVITY, GROUP, MANAGER, MEMBER, MINTER, PREFIX, RECEIPT};
use tokenpass::state::{Activity, Group, Minter, Receipt};

#[derive(Parser)]
#[command(name = "tokenpass", version, about = "TokenPass issuance CLI")]
struct Cli {
    #[arg(long)]
    cluster: Option<String>,

    #[arg(long)]
    keypair: Option<String>,

    /// Separate rent/fee payer keypair, required where the program forbids
    /// the authority from paying its own rent
    #[arg(long)]
    fee_payer: Option<String>,

    #[arg(long)]
    config: Option<String>,

    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    CreateMinter(CreateMinterArgs),
    PreparePayment(PreparePaymentArgs),
    MintMember(MintMemberArgs),
    Authority(AuthorityArgs),
    Show(MinterRefArgs),
    ReceiptStatus(ReceiptStatusArgs),
    Activity(ActivityArgs),
}

#[derive(Parser)]
struct CreateMinterArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    description: String,

    #[arg(long)]
    image_url: String,

    #[arg(long)]
    symbol: String,

    #[arg(long)]
    uri: String,

    #[arg(long)]
    max_size: u32,

    #[arg(long)]
    payment_mint: String,

    /// Price for creating this minter, in payment-mint units
    #[arg(long, default_value = "0")]
    price: String,

    #[arg(long, default_value_t = 1)]
    amount: u16,

    #[arg(long, default_value_t = 30)]
    days: u8,

    /// Price a member applicant pays, in payment-mint units
    #[arg(long, default_value = "0")]
    application_price: String,

    #[arg(long, default_value_t = 30)]
    application_days: u8,

    /// Comma-separated identity providers applicants must verify
    #[arg(long)]
    identities: Option<String>,

    #[arg(long)]
    interest_rate: Option<i16>,

    #[arg(long)]
    transfer_fee_bps: Option<u16>,

    #[arg(long)]
    max_fee: Option<String>,
}

#[derive(Parser)]
struct PreparePaymentArgs {
    receiver: String,
    amount: String,

    #[arg(long)]
    payment_mint: String,

    #[arg(long, default_value_t = 30)]
    days: u8,

    #[arg(long, value_enum, default_value = "user")]
    kind: ReceiptKindArg,

    /// Execute the token transfer even for a zero amount
    #[arg(long)]
    transfer_zero: bool,
}

#[derive(Parser)]
struct MintMemberArgs {
    recipient: String,

    #[arg(long)]
    mint: String,

    #[arg(long)]
    minter_name: String,

    #[arg(long)]
    name: String,

    #[arg(long)]
    symbol: String,

    #[arg(long)]
    uri: String,
}

#[derive(Parser)]
struct AuthorityArgs {
    #[command(subcommand)]
    command: AuthorityCmd,
}

#[derive(Subcommand)]
enum AuthorityCmd {
    Add(AuthorityChangeArgs),
    Remove(AuthorityChangeArgs),
    List(MinterRefArgs),
}

#[derive(Parser)]
struct AuthorityChangeArgs {
    address: String,

    #[arg(long)]
    mint: String,

    #[arg(long)]
    minter_name: String,
}

#[derive(Parser)]
struct MinterRefArgs {
    #[arg(long)]
    mint: String,

    #[arg(long)]
    minter_name: String,
}

#[derive(Parser)]
struct ReceiptStatusArgs {
    #[arg(long)]
    sender: String,

    #[arg(long)]
    receiver: String,

    #[arg(long)]
    payment_mint: String,
}

#[derive(Parser)]
struct ActivityArgs {
    #[command(subcommand)]
    command: ActivityCmd,
}

#[derive(Subcommand)]
enum ActivityCmd {
    Create(ActivityCreateArgs),
    Append(ActivityAppendArgs),
    Log(ActivityRefArgs),
}

#[derive(Parser)]
struct ActivityCreateArgs {
    #[arg(long)]
    member_mint: String,

    #[arg(long)]
    mint: String,

    #[arg(long)]
    minter_name: String,

    #[arg(long)]
    label: String,

    #[arg(long)]
    start: Option<i64>,

    #[arg(long)]
    end: Option<i64>,
}

#[derive(Parser)]
struct ActivityAppendArgs {
    #[arg(long)]
    member_mint: String,

    #[arg(long)]
    label: String,

    #[arg(long)]
    message: String,

    #[arg(long)]
    url: Option<String>,

    #[arg(long)]
    points: Option<u64>,

    #[arg(long)]
    timestamp: Option<i64>,
}

#[derive(Parser)]
struct ActivityRefArgs {
    #[arg(long)]
    member_mint: String,

    #[arg(long)]
    label: String,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq)]
enum ReceiptKindArg {
    User,
    Community,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let config_file = cli
        .config
        .as_ref()
        .map(|path| load_config(path))
        .transpose()?;
    let ctx = build_context(&cli, config_file.as_ref())?;

    match &cli.command {
        Commands::CreateMinter(args) => handle_create_minter(&ctx, args),
        Commands::PreparePayment(args) => handle_prepare_payment(&ctx, args),
        Commands::MintMember(args) => handle_mint_member(&ctx, args),
        Commands::Authority(args) => match &args.command {
            AuthorityCmd::Add(args) => handle_authority_change(&ctx, args, true),
            AuthorityCmd::Remove(args) => handle_authority_change(&ctx, args, false),
            AuthorityCmd::List(args) => handle_authority_list(&ctx, args),
        },
        Commands::Show(args) => handle_show(&ctx, args),
        Commands::ReceiptStatus(args) => handle_receipt_status(&ctx, args),
        Commands::Activity(args) => match &args.command {
            ActivityCmd::Create(args) => handle_activity_create(&ctx, args),
            ActivityCmd::Append(args) => handle_activity_append(&ctx, args),
            ActivityCmd::Log(args) => handle_activity_log(&ctx, args),
        },
    }
}

#[derive(Debug, Clone)]
struct ClusterInfo {
    url: String,
    label: Option<String>,
}

struct CliContext {
    client: RpcClient,
    payer: Keypair,
    fee_payer: Option<Keypair>,
    output: OutputFormat,
    cluster: ClusterInfo,
}

impl CliContext {
    /// The rent/fee payer keypair, falling back to the default signer.
    fn fee_payer(&self) -> &Keypair {
        self.fee_payer.as_ref().unwrap_or(&self.payer)
    }

    fn require_fee_payer(&self) -> Result<&Keypair> {
        self.fee_payer
            .as_ref()
            .ok_or_else(|| anyhow!("--fee-payer is required for this command"))
    }
}

fn build_context(cli: &Cli, config: Option<&ConfigFile>) -> Result<CliContext> {
    let network = config.and_then(|cfg| cfg.network.as_ref());

    let cluster_value = if let Some(value) = cli.cluster.as_deref() {
        value.to_string()
    } else if let Some(value) = network.and_then(|cfg| cfg.cluster.as_deref()) {
        value.to_string()
    } else {
        "devnet".to_string()
    };
    let cluster = resolve_cluster(&cluster_value)?;

    let keypair_value = if let Some(value) = cli.keypair.as_deref() {
        value.to_string()
    } else if let Some(value) = network.and_then(|cfg| cfg.keypair_path.as_deref()) {
        value.to_string()
    } else {
        "~/.config/solana/id.json".to_string()
    };
    let payer = read_keypair_file(expand_tilde(&keypair_value))
        .map_err(|err| anyhow!("Failed to read keypair: {}", err))?;

    let fee_payer = cli
        .fee_payer
        .as_deref()
        .map(|path| {
            read_keypair_file(expand_tilde(path))
                .map_err(|err| anyhow!("Failed to read fee payer keypair: {}", err))
        })
        .transpose()?;

    let commitment = parse_commitment(network.and_then(|cfg| cfg.commitment.as_deref()));
    let client = RpcClient::new_with_commitment(cluster.url.clone(), commitment);

    Ok(CliContext {
        client,
        payer,
        fee_payer,
        output: cli.output,
        cluster,
    })
}

fn handle_create_minter(ctx: &CliContext, args: &CreateMinterArgs) -> Result<()> {
    let fee_payer = ctx.require_fee_payer()?;
    let payment_mint = parse_pubkey(&args.payment_mint)?;
    let payment_decimals = ctx.client.get_token_supply(&payment_mint)?.decimals;
    let price = parse_amount(&args.price, payment_decimals)?;
    let application_price = parse_amount(&args.application_price, payment_decimals)?;

    let identities = args
        .identities
        .as_deref()
        .map(parse_identities)
        .transpose()?
        .unwrap_or_default();

    let mint_keypair = Keypair::new();
    let mint = mint_keypair.pubkey();
    let manager = find_manager_pda().0;
    let group = find_group_pda(&mint).0;
    let minter = find_minter_pda(&mint, &args.name).0;
    let minter_token_account =
        get_associated_token_address_with_program_id(&minter, &mint, &spl_token_2022::id());

    let transfer_fee_config = match (args.transfer_fee_bps, args.max_fee.as_deref()) {
        (Some(bps), max_fee) => Some(TransferFeeData {
            transfer_fee_basis_points: bps,
            max_fee_rate: match max_fee {
                Some(value) => parse_amount(value, payment_decimals)?,
                None => u64::MAX,
            },
        }),
        (None, _) => None,
    };

    let data = CreateMinterData {
        name: args.name.clone(),
        description: args.description.clone(),
        image_url: args.image_url.clone(),
        max_size: args.max_size,
        payment_config: PaymentTermsData {
            amount: args.amount,
            price,
            mint: payment_mint,
            days: args.days,
        },
        application_config: ApplicationData {
            identities,
            payment_config: PaymentConfigData {
                amount: 1,
                price: application_price,
                mint: payment_mint,
                days: args.application_days,
                expires_at: 0,
            },
        },
        metadata_config: MetadataData {
            name: args.name.clone(),
            symbol: args.symbol.clone(),
            uri: args.uri.clone(),
            metadata: None,
        },
        interest_config: args.interest_rate.map(|rate| InterestData { rate }),
        transfer_fee_config,
    }
    .try_to_vec()?;

    let accounts = vec![
        AccountMeta::new(manager, false),
        AccountMeta::new(group, false),
        AccountMeta::new(minter, false),
        AccountMeta::new(minter_token_account, false),
        AccountMeta::new(mint, true),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(ctx.payer.pubkey(), true),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction("create_minter", data, accounts);
    let signature = send_transaction(ctx, vec![ix], fee_payer, vec![&ctx.payer, &mint_keypair])?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&CreateMinterOutput {
            minter: minter.to_string(),
            mint: mint.to_string(),
            group: group.to_string(),
            signature,
            explorer,
        })
    } else {
        println!("Minter created");
        println!("Minter: {}", minter);
        println!("Mint:   {}", mint);
        println!("Group:  {}", group);
        println!("Tx:     {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_prepare_payment(ctx: &CliContext, args: &PreparePaymentArgs) -> Result<()> {
    let receiver = parse_pubkey(&args.receiver)?;
    let payment_mint = parse_pubkey(&args.payment_mint)?;
    let token_program = ctx.client.get_account(&payment_mint)?.owner;
    let decimals = ctx.client.get_token_supply(&payment_mint)?.decimals;
    let amount = parse_amount(&args.amount, decimals)?;

    let sender = ctx.payer.pubkey();
    let receipt = find_receipt_pda(&sender, &receiver, &payment_mint).0;
    let sender_token_account =
        get_associated_token_address_with_program_id(&sender, &payment_mint, &token_program);
    let receiver_token_account =
        get_associated_token_address_with_program_id(&receiver, &payment_mint, &token_program);

    let data = PrepareForPaymentData {
        amount,
        kind: match args.kind {
            ReceiptKindArg::User => ReceiptKindData::User,
            ReceiptKindArg::Community => ReceiptKindData::Community,
        },
        days: args.days,
        transfer_zero_amount: args.transfer_zero,
    }
    .try_to_vec()?;

    let fee_payer = ctx.fee_payer();
    let accounts = vec![
        AccountMeta::new(receipt, false),
        AccountMeta::new_readonly(sender, true),
        AccountMeta::new(sender_token_account, false),
        AccountMeta::new_readonly(receiver, false),
        AccountMeta::new(receiver_token_account, false),
        AccountMeta::new_readonly(payment_mint, false),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(token_program, false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction("prepare_for_payment", data, accounts);
    let signature = send_transaction(ctx, vec![ix], fee_payer, vec![&ctx.payer])?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&PreparePaymentOutput {
            receipt: receipt.to_string(),
            amount: format_amount(amount, decimals),
            signature,
            explorer,
        })
    } else {
        println!(
            "Paid {} to {}",
            format_amount(amount, decimals),
            receiver
        );
        println!("Receipt: {}", receipt);
        println!("Tx:      {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_mint_member(ctx: &CliContext, args: &MintMemberArgs) -> Result<()> {
    let recipient = parse_pubkey(&args.recipient)?;
    let collection_mint = parse_pubkey(&args.mint)?;
    let minter_pda = find_minter_pda(&collection_mint, &args.minter_name).0;
    let minter = fetch_minter(ctx, &minter_pda)?;

    let fee_payer = ctx.fee_payer();
    if fee_payer.pubkey() != minter.fee_payer {
        return Err(anyhow!(
            "Fee payer {} does not match the minter's designated fee payer {}",
            fee_payer.pubkey(),
            minter.fee_payer
        ));
    }

    let member_mint_keypair = Keypair::new();
    let member_mint = member_mint_keypair.pubkey();
    let manager = find_manager_pda().0;
    let group = minter.group;
    let member = find_member_pda(&member_mint).0;
    let recipient_token_account = get_associated_token_address_with_program_id(
        &recipient,
        &member_mint,
        &spl_token_2022::id(),
    );

    let data = MintMinterData {
        name: args.name.clone(),
        symbol: args.symbol.clone(),
        uri: args.uri.clone(),
        metadata: None,
    }
    .try_to_vec()?;

    let accounts = vec![
        AccountMeta::new_readonly(manager, false),
        AccountMeta::new(group, false),
        AccountMeta::new(member, false),
        AccountMeta::new_readonly(minter_pda, false),
        AccountMeta::new(member_mint, true),
        AccountMeta::new_readonly(recipient, false),
        AccountMeta::new(recipient_token_account, false),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(ctx.payer.pubkey(), true),
        AccountMeta::new_readonly(spl_token_2022::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction("mint_minter", data, accounts);
    let signature = send_transaction(
        ctx,
        vec![ix],
        fee_payer,
        vec![&ctx.payer, &member_mint_keypair],
    )?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&MintMemberOutput {
            member: member.to_string(),
            mint: member_mint.to_string(),
            recipient: recipient.to_string(),
            signature,
            explorer,
        })
    } else {
        println!("Member token minted");
        println!("Mint:      {}", member_mint);
        println!("Member:    {}", member);
        println!("Recipient: {}", recipient);
        println!("Tx:        {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_authority_change(
    ctx: &CliContext,
    args: &AuthorityChangeArgs,
    add: bool,
) -> Result<()> {
    let mint = parse_pubkey(&args.mint)?;
    let target = parse_pubkey(&args.address)?;
    let minter = find_minter_pda(&mint, &args.minter_name).0;
    let fee_payer = ctx.require_fee_payer()?;

    let name = if add {
        "add_authority"
    } else {
        "remove_authority"
    };
    let data = AuthorityChangeData { authority: target }.try_to_vec()?;

    let accounts = vec![
        AccountMeta::new(minter, false),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(ctx.payer.pubkey(), true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction(name, data, accounts);
    let signature = send_transaction(ctx, vec![ix], fee_payer, vec![&ctx.payer])?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&SimpleOutput {
            signature,
            explorer,
        })
    } else {
        if add {
            println!("Added authority: {}", target);
        } else {
            println!("Removed authority: {}", target);
        }
        println!("Tx: {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_authority_list(ctx: &CliContext, args: &MinterRefArgs) -> Result<()> {
    let mint = parse_pubkey(&args.mint)?;
    let minter = fetch_minter(ctx, &find_minter_pda(&mint, &args.minter_name).0)?;

    if ctx.output == OutputFormat::Json {
        print_json(&AuthorityListOutput {
            authorities: minter
                .authorities
                .iter()
                .map(|key| key.to_string())
                .collect(),
        })
    } else {
        for authority in &minter.authorities {
            println!("{}", authority);
        }
        Ok(())
    }
}

fn handle_show(ctx: &CliContext, args: &MinterRefArgs) -> Result<()> {
    let mint = parse_pubkey(&args.mint)?;
    let minter_pda = find_minter_pda(&mint, &args.minter_name).0;
    let minter = fetch_minter(ctx, &minter_pda)?;
    let group = fetch_group(ctx, &minter.group)?;

    let identities: Vec<String> = minter
        .minter_config
        .application_config
        .identities
        .iter()
        .map(|provider| provider.as_str().to_string())
        .collect();

    if ctx.output == OutputFormat::Json {
        print_json(&ShowOutput {
            minter: minter_pda.to_string(),
            mint: mint.to_string(),
            name: minter.name,
            description: minter.description,
            image_url: minter.image_url,
            fee_payer: minter.fee_payer.to_string(),
            authorities: minter
                .authorities
                .iter()
                .map(|key| key.to_string())
                .collect(),
            group_size: group.size,
            group_max_size: group.max_size,
            required_identities: identities,
            payment_expires_at: minter.payment_config.expires_at,
        })
    } else {
        println!("Minter: {}", minter_pda);
        println!("Name:        {}", minter.name);
        println!("Description: {}", minter.description);
        println!("Image:       {}", minter.image_url);
        println!("Fee payer:   {}", minter.fee_payer);
        println!("Members:     {}/{}", group.size, group.max_size);
        println!("Authorities:");
        for authority in &minter.authorities {
            println!("  {}", authority);
        }
        if !identities.is_empty() {
            println!("Required identities: {}", identities.join(", "));
        }
        if minter.payment_config.expires_at > 0 {
            println!("Paid through: {}", minter.payment_config.expires_at);
        }
        Ok(())
    }
}

fn handle_receipt_status(ctx: &CliContext, args: &ReceiptStatusArgs) -> Result<()> {
    let sender = parse_pubkey(&args.sender)?;
    let receiver = parse_pubkey(&args.receiver)?;
    let payment_mint = parse_pubkey(&args.payment_mint)?;
    let receipt_pda = find_receipt_pda(&sender, &receiver, &payment_mint).0;
    let receipt = fetch_receipt(ctx, &receipt_pda)?;

    match receipt {
        Some(receipt) => {
            if ctx.output == OutputFormat::Json {
                print_json(&ReceiptOutput {
                    receipt: receipt_pda.to_string(),
                    amount: receipt.amount,
                    created_at: receipt.created_at,
                    expires_at: receipt.expires_at,
                })
            } else {
                println!("Receipt: {}", receipt_pda);
                println!("Amount:     {}", receipt.amount);
                println!("Created at: {}", receipt.created_at);
                println!("Expires at: {}", receipt.expires_at);
                Ok(())
            }
        }
        None => {
            if ctx.output == OutputFormat::Json {
                print_json(&serde_json::json!({ "receipt": null }))
            } else {
                println!("No receipt found");
                Ok(())
            }
        }
    }
}

fn handle_activity_create(ctx: &CliContext, args: &ActivityCreateArgs) -> Result<()> {
    let member_mint = parse_pubkey(&args.member_mint)?;
    let collection_mint = parse_pubkey(&args.mint)?;
    let minter_pda = find_minter_pda(&collection_mint, &args.minter_name).0;
    let minter = fetch_minter(ctx, &minter_pda)?;
    let fee_payer = ctx.fee_payer();

    let activity = find_activity_pda(&member_mint, &args.label).0;
    let member = find_member_pda(&member_mint).0;

    let data = CreateActivityData {
        label: args.label.clone(),
        start_date: args.start,
        end_date: args.end,
    }
    .try_to_vec()?;

    let accounts = vec![
        AccountMeta::new(activity, false),
        AccountMeta::new_readonly(minter_pda, false),
        AccountMeta::new_readonly(minter.group, false),
        AccountMeta::new_readonly(member, false),
        AccountMeta::new_readonly(member_mint, false),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(ctx.payer.pubkey(), true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction("create_activity", data, accounts);
    let signature = send_transaction(ctx, vec![ix], fee_payer, vec![&ctx.payer])?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&ActivityOutput {
            activity: activity.to_string(),
            signature,
            explorer,
        })
    } else {
        println!("Activity created: {}", activity);
        println!("Tx: {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_activity_append(ctx: &CliContext, args: &ActivityAppendArgs) -> Result<()> {
    let member_mint = parse_pubkey(&args.member_mint)?;
    let activity_pda = find_activity_pda(&member_mint, &args.label).0;
    let activity = fetch_activity(ctx, &activity_pda)?;
    let fee_payer = ctx.fee_payer();

    let data = AppendActivityEntryData {
        timestamp: args.timestamp,
        message: args.message.clone(),
        url: args.url.clone(),
        points: args.points,
    }
    .try_to_vec()?;

    let accounts = vec![
        AccountMeta::new(activity_pda, false),
        AccountMeta::new_readonly(activity.minter, false),
        AccountMeta::new_readonly(ctx.payer.pubkey(), true),
        AccountMeta::new(fee_payer.pubkey(), true),
        AccountMeta::new_readonly(system_program::id(), false),
    ];
    let ix = build_instruction("append_activity_entry", data, accounts);
    let signature = send_transaction(ctx, vec![ix], fee_payer, vec![&ctx.payer])?;
    let explorer = explorer_url(&signature, &ctx.cluster);

    if ctx.output == OutputFormat::Json {
        print_json(&ActivityOutput {
            activity: activity_pda.to_string(),
            signature,
            explorer,
        })
    } else {
        println!("Entry appended to {}", activity_pda);
        println!("Tx: {}", signature);
        if let Some(url) = explorer {
            println!("Explorer: {}", url);
        }
        Ok(())
    }
}

fn handle_activity_log(ctx: &CliContext, args: &ActivityRefArgs) -> Result<()> {
    let member_mint = parse_pubkey(&args.member_mint)?;
    let activity_pda = find_activity_pda(&member_mint, &args.label).0;
    let activity = fetch_activity(ctx, &activity_pda)?;

    if ctx.output == OutputFormat::Json {
        print_json(&ActivityLogOutput {
            activity: activity_pda.to_string(),
            label: activity.label,
            start_date: activity.start_date,
            end_date: activity.end_date,
            entries: activity
                .entries
                .iter()
                .map(|entry| EntryOutput {
                    timestamp: entry.timestamp,
                    message: entry.message.clone(),
                    url: entry.url.clone(),
                    points: entry.points,
                })
                .collect(),
        })
    } else {
        println!("Activity: {} ({})", activity.label, activity_pda);
        if activity.entries.is_empty() {
            println!("No entries");
        }
        for entry in &activity.entries {
            match &entry.url {
                Some(url) => println!(
                    "{} {} (+{} pts) {}",
                    entry.timestamp, entry.message, entry.points, url
                ),
                None => println!("{} {} (+{} pts)", entry.timestamp, entry.message, entry.points),
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    network: Option<NetworkConfig>,
}

#[derive(Debug, Clone, Deserialize)]
struct NetworkConfig {
    cluster: Option<String>,
    keypair_path: Option<String>,
    commitment: Option<String>,
}

fn load_config(path: &str) -> Result<ConfigFile> {
    let contents = fs::read_to_string(expand_tilde(path))
        .with_context(|| format!("Failed to read config: {}", path))?;
    toml::from_str(&contents).context("Failed to parse config")
}

fn resolve_cluster(input: &str) -> Result<ClusterInfo> {
    let lowered = input.to_lowercase();
    let (url, label) = match lowered.as_str() {
        "devnet" => (
            "https://api.devnet.solana.com".to_string(),
            Some("devnet".to_string()),
        ),
        "testnet" => (
            "https://api.testnet.solana.com".to_string(),
            Some("testnet".to_string()),
        ),
        "mainnet" | "mainnet-beta" => (
            "https://api.mainnet-beta.solana.com".to_string(),
            Some("mainnet-beta".to_string()),
        ),
        "localnet" => (
            "http://127.0.0.1:8899".to_string(),
            Some("localnet".to_string()),
        ),
        _ => {
            if input.starts_with("http://") || input.starts_with("https://") {
                let label = if lowered.contains("devnet") {
                    Some("devnet".to_string())
                } else if lowered.contains("testnet") {
                    Some("testnet".to_string())
                } else if lowered.contains("mainnet") {
                    Some("mainnet-beta".to_string())
                } else {
                    None
                };
                (input.to_string(), label)
            } else {
                return Err(anyhow!("Unknown cluster: {}", input));
            }
        }
    };
    Ok(ClusterInfo { url, label })
}

fn parse_commitment(value: Option<&str>) -> CommitmentConfig {
    match value.unwrap_or("confirmed") {
        "processed" => CommitmentConfig::processed(),
        "finalized" => CommitmentConfig::finalized(),
        _ => CommitmentConfig::confirmed(),
    }
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

fn parse_pubkey(value: &str) -> Result<Pubkey> {
    Pubkey::from_str(value).map_err(|_| anyhow!("Invalid pubkey: {}", value))
}

fn parse_identities(value: &str) -> Result<Vec<IdentityProviderData>> {
    value
        .split(',')
        .map(|entry| match entry.trim().to_lowercase().as_str() {
            "discord" => Ok(IdentityProviderData::Discord),
            "github" => Ok(IdentityProviderData::GitHub),
            "google" => Ok(IdentityProviderData::Google),
            "twitter" => Ok(IdentityProviderData::Twitter),
            other => Err(anyhow!("Unknown identity provider: {}", other)),
        })
        .collect()
}

fn parse_amount(value: &str, decimals: u8) -> Result<u64> {
    let sanitized = value.replace('_', "");
    if let Some((whole, fractional)) = sanitized.split_once('.') {
        let whole_value: u64 = if whole.is_empty() { 0 } else { whole.parse()? };
        let mut fraction = fractional.to_string();
        if fraction.len() > decimals as usize {
            return Err(anyhow!("Too many decimal places"));
        }
        while fraction.len() < decimals as usize {
            fraction.push('0');
        }
        let fractional_value: u64 = if fraction.is_empty() {
            0
        } else {
            fraction.parse()?
        };
        let scale = 10u64
            .checked_pow(decimals as u32)
            .ok_or_else(|| anyhow!("Decimal overflow"))?;
        let total = whole_value
            .checked_mul(scale)
            .and_then(|value| value.checked_add(fractional_value))
            .ok_or_else(|| anyhow!("Amount overflow"))?;
        Ok(total)
    } else {
        Ok(sanitized.parse()?)
    }
}

fn format_amount(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u64.pow(decimals as u32);
    let whole = amount / scale;
    let frac = amount % scale;
    format!("{}.{:0width$}", whole, frac, width = decimals as usize)
}

fn explorer_url(signature: &str, cluster: &ClusterInfo) -> Option<String> {
    cluster.label.as_ref().map(|label| {
        format!(
            "https://explorer.solana.com/tx/{}?cluster={}",
            signature, label
        )
    })
}

fn send_transaction(
    ctx: &CliContext,
    instructions: Vec<Instruction>,
    payer: &Keypair,
    extra_signers: Vec<&Keypair>,
) -> Result<String> {
    let blockhash = ctx.client.get_latest_blockhash()?;
    let mut transaction = Transaction::new_with_payer(&instructions, Some(&payer.pubkey()));
    let mut signers: Vec<&dyn Signer> = vec![payer];
    for signer in extra_signers {
        if signer.pubkey() != payer.pubkey() {
            signers.push(signer);
        }
    }
    transaction.sign(&signers, blockhash);
    let signature = ctx.client.send_and_confirm_transaction(&transaction)?;
    Ok(signature.to_string())
}

fn fetch_minter(ctx: &CliContext, minter_pda: &Pubkey) -> Result<Minter> {
    let account = ctx.client.get_account(minter_pda)?;
    let mut data = account.data.as_slice();
    Minter::try_deserialize(&mut data).context("Failed to decode minter")
}

fn fetch_group(ctx: &CliContext, group_pda: &Pubkey) -> Result<Group> {
    let account = ctx.client.get_account(group_pda)?;
    let mut data = account.data.as_slice();
    Group::try_deserialize(&mut data).context("Failed to decode group")
}

fn fetch_receipt(ctx: &CliContext, receipt_pda: &Pubkey) -> Result<Option<Receipt>> {
    let account = match ctx.client.get_account(receipt_pda) {
        Ok(value) => value,
        Err(_) => return Ok(None),
    };
    let mut data = account.data.as_slice();
    let decoded = Receipt::try_deserialize(&mut data).context("Failed to decode receipt")?;
    Ok(Some(decoded))
}

fn fetch_activity(ctx: &CliContext, activity_pda: &Pubkey) -> Result<Activity> {
    let account = ctx.client.get_account(activity_pda)?;
    let mut data = account.data.as_slice();
    Activity::try_deserialize(&mut data).context("Failed to decode activity")
}

fn find_manager_pda() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MANAGER], &tokenpass::ID)
}

fn find_group_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[GROUP, mint.as_ref()], &tokenpass::ID)
}

fn find_member_pda(mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[MEMBER, mint.as_ref()], &tokenpass::ID)
}

fn find_minter_pda(mint: &Pubkey, name: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PREFIX, MINTER, mint.as_ref(), name.as_bytes()],
        &tokenpass::ID,
    )
}

fn find_receipt_pda(sender: &Pubkey, receiver: &Pubkey, payment_mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            PREFIX,
            RECEIPT,
            sender.as_ref(),
            receiver.as_ref(),
            payment_mint.as_ref(),
        ],
        &tokenpass::ID,
    )
}

fn find_activity_pda(mint: &Pubkey, label: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PREFIX, ACTIVITY, mint.as_ref(), label.as_bytes()],
        &tokenpass::ID,
    )
}

fn anchor_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("global:{}", name));
    let hash = hasher.finalize();
    let mut output = [0u8; 8];
    output.copy_from_slice(&hash[..8]);
    output
}

fn build_instruction(name: &str, data: Vec<u8>, accounts: Vec<AccountMeta>) -> Instruction {
    let mut payload = Vec::with_capacity(8 + data.len());
    payload.extend_from_slice(&anchor_discriminator(name));
    payload.extend_from_slice(&data);
    Instruction {
        program_id: tokenpass::ID,
        accounts,
        data: payload,
    }
}

#[derive(BorshSerialize, Clone, Copy)]
enum IdentityProviderData {
    Discord,
    GitHub,
    Google,
    Twitter,
}

#[derive(BorshSerialize, Clone, Copy)]
enum ReceiptKindData {
    User,
    Community,
}

#[derive(BorshSerialize)]
struct PaymentTermsData {
    amount: u16,
    price: u64,
    mint: Pubkey,
    days: u8,
}

#[derive(BorshSerialize)]
struct PaymentConfigData {
    amount: u16,
    price: u64,
    mint: Pubkey,
    days: u8,
    expires_at: i64,
}

#[derive(BorshSerialize)]
struct ApplicationData {
    identities: Vec<IdentityProviderData>,
    payment_config: PaymentConfigData,
}

#[derive(BorshSerialize)]
struct MetadataData {
    name: String,
    symbol: String,
    uri: String,
    metadata: Option<Vec<[String; 2]>>,
}

#[derive(BorshSerialize)]
struct InterestData {
    rate: i16,
}

#[derive(BorshSerialize)]
struct TransferFeeData {
    transfer_fee_basis_points: u16,
    max_fee_rate: u64,
}

#[derive(BorshSerialize)]
struct CreateMinterData {
    name: String,
    description: String,
    image_url: String,
    max_size: u32,
    payment_config: PaymentTermsData,
    application_config: ApplicationData,
    metadata_config: MetadataData,
    interest_config: Option<InterestData>,
    transfer_fee_config: Option<TransferFeeData>,
}

#[derive(BorshSerialize)]
struct PrepareForPaymentData {
    amount: u64,
    kind: ReceiptKindData,
    days: u8,
    transfer_zero_amount: bool,
}

#[derive(BorshSerialize)]
struct MintMinterData {
    name: String,
    symbol: String,
    uri: String,
    metadata: Option<Vec<[String; 2]>>,
}

#[derive(BorshSerialize)]
struct AuthorityChangeData {
    authority: Pubkey,
}

#[derive(BorshSerialize)]
struct CreateActivityData {
    label: String,
    start_date: Option<i64>,
    end_date: Option<i64>,
}

#[derive(BorshSerialize)]
struct AppendActivityEntryData {
    timestamp: Option<i64>,
    message: String,
    url: Option<String>,
    points: Option<u64>,
}

#[derive(Serialize)]
struct CreateMinterOutput {
    minter: String,
    mint: String,
    group: String,
    signature: String,
    explorer: Option<String>,
}

#[derive(Serialize)]
struct PreparePaymentOutput {
    receipt: String,
    amount: String,
    signature: String,
    explorer: Option<String>,
}

#[derive(Serialize)]
struct MintMemberOutput {
    member: String,
    mint: String,
    recipient: String,
    signature: String,
    explorer: Option<String>,
}

#[derive(Serialize)]
struct SimpleOutput {
    signature: String,
    explorer: Option<String>,
}

#[derive(Serialize)]
struct AuthorityListOutput {
    authorities: Vec<String>,
}

#[derive(Serialize)]
struct ShowOutput {
    minter: String,
    mint: String,
    name: String,
    description: String,
    image_url: String,
    fee_payer: String,
    authorities: Vec<String>,
    group_size: u32,
    group_max_size: u32,
    required_identities: Vec<String>,
    payment_expires_at: i64,
}

#[derive(Serialize)]
struct ReceiptOutput {
    receipt: String,
    amount: u64,
    created_at: i64,
    expires_at: i64,
}

#[derive(Serialize)]
struct ActivityOutput {
    activity: String,
    signature: String,
    explorer: Option<String>,
}

#[derive(Serialize)]
struct ActivityLogOutput {
    activity: String,
    label: String,
    start_date: i64,
    end_date: i64,
    entries: Vec<EntryOutput>,
}

#[derive(Serialize)]
struct EntryOutput {
    timestamp: i64,
    message: String,
    url: Option<String>,
    points: u64,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_amount, parse_amount, parse_identities};

    #[test]
    fn parses_amounts_with_decimals() {
        assert_eq!(parse_amount("1", 6).unwrap(), 1);
        assert_eq!(parse_amount("1.5", 6).unwrap(), 1_500_000);
        assert_eq!(parse_amount("0.000001", 6).unwrap(), 1);
        assert_eq!(parse_amount("1_000.25", 2).unwrap(), 100_025);
    }

    #[test]
    fn formats_amounts() {
        assert_eq!(format_amount(1_500_000, 6), "1.500000");
        assert_eq!(format_amount(100, 2), "1.00");
        assert_eq!(format_amount(10, 0), "10");
    }

    #[test]
    fn parses_identity_lists() {
        let parsed = parse_identities("discord, github").unwrap();
        assert_eq!(parsed.len(), 2);
        assert!(parse_identities("myspace").is_err());
    }
}
