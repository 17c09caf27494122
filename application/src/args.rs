//! [`Args`] definitions.

use clap::{Parser, Subcommand};
use common::Date;
use service::{
    command,
    domain::{placement, receipt, user},
};

/// Receipts management of the advertising agency.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,

    /// [`Command`] to execute.
    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// Parses command line arguments.
    ///
    /// # Errors
    ///
    /// Errors if failed to parse command line arguments.
    pub fn parse() -> Result<Self, clap::Error> {
        <Self as Parser>::try_parse()
    }
}

/// Command to execute.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Creates a new receipt for a client.
    CreateReceipt(CreateReceipt),

    /// Updates the payment details of a receipt.
    UpdateReceipt(UpdateReceipt),

    /// Creates a new placement or updates an existing one.
    SavePlacement(SavePlacement),

    /// Adds a publication date to a placement.
    AddDate(AddDate),

    /// Prints the total amount charged for a receipt.
    Total {
        /// ID of the receipt.
        receipt: receipt::Id,
    },

    /// Prints the preview of a receipt.
    Preview {
        /// ID of the receipt.
        receipt: receipt::Id,
    },

    /// Prints the change history of a placement.
    History {
        /// ID of the placement.
        placement: placement::Id,
    },
}

/// Arguments of [`Command::CreateReceipt`].
#[derive(Debug, clap::Args)]
pub struct CreateReceipt {
    /// ID of the employee creating the receipt.
    #[arg(long)]
    pub user: user::Id,

    /// Name of the client.
    #[arg(long)]
    pub client_name: receipt::ClientName,

    /// Phone number of the client.
    #[arg(long)]
    pub phone: receipt::Phone,

    /// Address of the client.
    #[arg(long)]
    pub address: Option<receipt::Address>,

    /// Name of the bank the payment is made through.
    #[arg(long)]
    pub bank_name: Option<receipt::BankName>,

    /// Branch of the bank.
    #[arg(long)]
    pub branch: Option<receipt::Branch>,

    /// Mode of the payment (`CASH` or `CHEQUE`).
    #[arg(long, default_value = "CASH")]
    pub payment_mode: receipt::PaymentMode,

    /// Caption of the receipt.
    #[arg(long)]
    pub caption: Option<receipt::Caption>,
}

impl From<CreateReceipt> for command::CreateReceipt {
    fn from(args: CreateReceipt) -> Self {
        let CreateReceipt {
            user,
            client_name,
            phone,
            address,
            bank_name,
            branch,
            payment_mode,
            caption,
        } = args;
        Self {
            client_name,
            phone,
            address,
            bank_name,
            branch,
            payment_mode,
            caption,
            created_by: user,
        }
    }
}

/// Arguments of [`Command::UpdateReceipt`].
#[derive(Debug, clap::Args)]
pub struct UpdateReceipt {
    /// ID of the receipt.
    pub receipt: receipt::Id,

    /// Name of the bank the payment is made through.
    #[arg(long)]
    pub bank_name: Option<receipt::BankName>,

    /// Branch of the bank.
    #[arg(long)]
    pub branch: Option<receipt::Branch>,

    /// Mode of the payment (`CASH` or `CHEQUE`).
    #[arg(long, default_value = "CASH")]
    pub payment_mode: receipt::PaymentMode,

    /// Caption of the receipt.
    #[arg(long)]
    pub caption: Option<receipt::Caption>,
}

impl From<UpdateReceipt> for command::UpdateReceipt {
    fn from(args: UpdateReceipt) -> Self {
        let UpdateReceipt {
            receipt,
            bank_name,
            branch,
            payment_mode,
            caption,
        } = args;
        Self {
            receipt_id: receipt,
            bank_name,
            branch,
            payment_mode,
            caption,
        }
    }
}

/// Arguments of [`Command::SavePlacement`].
#[derive(Debug, clap::Args)]
pub struct SavePlacement {
    /// ID of the employee saving the placement.
    #[arg(long)]
    pub user: user::Id,

    /// ID of the receipt the placement belongs to.
    #[arg(long)]
    pub receipt: receipt::Id,

    /// ID of the placement to update. A new one is created if omitted.
    #[arg(long)]
    pub placement: Option<placement::Id>,

    /// Name of the paper.
    #[arg(long)]
    pub paper: placement::PaperName,

    /// Caption of the advertisement.
    #[arg(long)]
    pub caption: placement::Caption,

    /// Edition of the paper.
    #[arg(long)]
    pub edition: placement::Edition,

    /// Base rate of the placement.
    #[arg(long)]
    pub rate: placement::Rate,

    /// Number of extra lines or words.
    #[arg(long)]
    pub extra_units: Option<placement::ExtraUnits>,

    /// Cost of a single extra line or word.
    #[arg(long)]
    pub extra_unit_cost: Option<placement::ExtraUnitCost>,
}

impl From<SavePlacement> for command::SavePlacement {
    fn from(args: SavePlacement) -> Self {
        let SavePlacement {
            user,
            receipt,
            placement,
            paper,
            caption,
            edition,
            rate,
            extra_units,
            extra_unit_cost,
        } = args;
        Self {
            placement_id: placement,
            receipt_id: receipt,
            paper,
            caption,
            edition,
            rate,
            extra_units,
            extra_unit_cost,
            acting_user: user,
        }
    }
}

/// Arguments of [`Command::AddDate`].
#[derive(Debug, clap::Args)]
pub struct AddDate {
    /// ID of the placement.
    pub placement: placement::Id,

    /// Date of the publication (`YYYY-MM-DD`).
    #[arg(long)]
    pub date: Option<Date>,
}

impl From<AddDate> for command::AddPublicationDate {
    fn from(AddDate { placement, date }: AddDate) -> Self {
        Self {
            placement_id: placement,
            date,
        }
    }
}

#[cfg(test)]
mod spec {
    use clap::Parser as _;
    use service::{command, domain::receipt};

    use super::{Args, Command};

    #[test]
    fn parses_save_placement() {
        let args = Args::try_parse_from([
            "application",
            "save-placement",
            "--user",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--receipt",
            "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "--paper",
            "Dainik Bhaskar",
            "--caption",
            "Obituary",
            "--edition",
            "Jaipur",
            "--rate",
            "500",
            "--extra-units",
            "10",
            "--extra-unit-cost",
            "20",
        ])
        .unwrap();

        assert_eq!(args.config, "config.toml");
        let Command::SavePlacement(save) = args.command else {
            panic!("expected `save-placement` command");
        };
        let cmd = command::SavePlacement::from(save);
        assert_eq!(cmd.placement_id, None);
        assert_eq!(cmd.rate.to_string(), "500");
        assert_eq!(cmd.extra_units.map(|u| u.to_string()), Some("10".into()));
        assert_eq!(
            cmd.acting_user.to_string(),
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
        );
    }

    #[test]
    fn parses_create_receipt_with_defaults() {
        let args = Args::try_parse_from([
            "application",
            "--config",
            "local.toml",
            "create-receipt",
            "--user",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--client-name",
            "Sharma Traders",
            "--phone",
            "+919876543210",
        ])
        .unwrap();

        assert_eq!(args.config, "local.toml");
        let Command::CreateReceipt(create) = args.command else {
            panic!("expected `create-receipt` command");
        };
        let cmd = command::CreateReceipt::from(create);
        assert_eq!(cmd.payment_mode, receipt::PaymentMode::Cash);
        assert!(cmd.address.is_none());
    }

    #[test]
    fn allows_missing_publication_date() {
        let args = Args::try_parse_from([
            "application",
            "add-date",
            "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
        ])
        .unwrap();

        let Command::AddDate(add) = args.command else {
            panic!("expected `add-date` command");
        };
        assert!(add.date.is_none());
    }

    #[test]
    fn rejects_invalid_rate() {
        assert!(Args::try_parse_from([
            "application",
            "save-placement",
            "--user",
            "67e55044-10b1-426f-9247-bb680e5fe0c8",
            "--receipt",
            "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
            "--paper",
            "Dainik Bhaskar",
            "--caption",
            "Obituary",
            "--edition",
            "Jaipur",
            "--rate",
            "-5",
        ])
        .is_err());
    }
}
