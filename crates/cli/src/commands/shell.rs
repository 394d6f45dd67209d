//! Interactive storefront shell.
//!
//! Each input line is parsed as a command with clap. Failed actions print
//! their alert and the session carries on; destructive actions ask for a
//! `[y/N]` answer on the same input first.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use secrecy::SecretString;
use tracing::debug;

use quickcart_core::{OrderId, OrderStatus, ProductId};
use quickcart_storefront::Storefront;
use quickcart_storefront::cart::Cart;
use quickcart_storefront::catalog::CatalogClient;
use quickcart_storefront::orders::{Cancellation, Order};
use quickcart_storefront::prompt::{Toast, ToastLevel};
use quickcart_storefront::router::{AuthForm, Resolution, View};
use quickcart_storefront::storage::KeyValueStore;
use quickcart_storefront::wishlist::Wishlist;

use super::CliError;
use super::catalog::write_catalog;

const HELP: &str = "\
Account:
  signup <username> <password>   Create an account and sign in
  signin <username> <password>   Sign in
  signout                        Sign out
  toggle                         Switch between the sign-in and sign-up forms
  open <path>                    Show what a path leads to

Shopping:
  catalog                        Reload and list products
  add <product-id>               Add a product to the cart
  wish <product-id>              Add a product to the wishlist
  unwish <name>                  Remove a product from the wishlist
  cart                           Show the cart
  remove <name>                  Remove a line from the cart
  qty <name> <n>                 Set a cart line's quantity
  wishlist                       Show the wishlist

Orders:
  address <text>                 Set the shipping address
  order                          Place an order for the cart
  orders                         Show placed orders
  advance <id>                   Move an order to its next status
  cancel <id>                    Cancel a processing order

  help                           Show this help
  quit                           Leave the shell";

/// One line of shell input.
#[derive(Parser)]
#[command(no_binary_name = true, disable_help_subcommand = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Create an account and sign in
    Signup { username: String, password: String },
    /// Sign in
    Signin { username: String, password: String },
    /// Sign out
    Signout,
    /// Switch between the sign-in and sign-up forms
    Toggle,
    /// Show what a path leads to
    Open { path: String },
    /// Reload and list products
    Catalog,
    /// Add a product to the cart
    Add { id: ProductId },
    /// Add a product to the wishlist
    Wish { id: ProductId },
    /// Remove a product from the wishlist
    Unwish {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Show the cart
    Cart,
    /// Remove a line from the cart
    Remove {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true)]
        name: Vec<String>,
    },
    /// Set a cart line's quantity
    Qty {
        #[arg(
            value_name = "NAME N",
            required = true,
            num_args = 2..,
            trailing_var_arg = true,
            allow_hyphen_values = true
        )]
        args: Vec<String>,
    },
    /// Show the wishlist
    Wishlist,
    /// Set the shipping address
    Address {
        #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Place an order for the cart
    Order,
    /// Show placed orders
    Orders,
    /// Move an order to its next status
    Advance { id: OrderId },
    /// Cancel a processing order
    Cancel { id: OrderId },
    /// Show help
    Help,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented front end over a [`Storefront`].
pub struct Shell<R, W> {
    input: R,
    output: W,
    client: CatalogClient,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub const fn new(input: R, output: W, client: CatalogClient) -> Self {
        Self {
            input,
            output,
            client,
        }
    }

    /// Read and run commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns `CliError::Io` if reading input or writing output fails.
    /// Storefront failures are shown as alerts and do not end the loop.
    pub async fn run<S: KeyValueStore>(&mut self, app: &mut Storefront<S>) -> Result<(), CliError> {
        writeln!(self.output, "Welcome to Quickcart. Type `help` for commands.")?;
        if app.is_signed_in() {
            self.enter_main(app).await?;
        }

        loop {
            write!(self.output, "{}> ", prompt_label(app.view()))?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }

            let command = match ShellLine::try_parse_from(line.split_whitespace()) {
                Ok(parsed) => parsed.command,
                Err(err) => {
                    writeln!(self.output, "{}", err.render())?;
                    continue;
                }
            };

            match self.execute(app, command).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(CliError::Storefront(err)) => {
                    err.report();
                    writeln!(self.output, "Alert: {}", err.alert_message())?;
                }
                Err(err) => return Err(err),
            }
            self.show_toasts(app)?;
        }

        writeln!(self.output, "Bye.")?;
        Ok(())
    }

    #[allow(clippy::too_many_lines)]
    async fn execute<S: KeyValueStore>(
        &mut self,
        app: &mut Storefront<S>,
        command: ShellCommand,
    ) -> Result<Flow, CliError> {
        match command {
            ShellCommand::Signup { username, password } => {
                let username = app.sign_up(&username, &SecretString::from(password))?;
                writeln!(self.output, "Welcome, {username}!")?;
                self.enter_main(app).await?;
            }
            ShellCommand::Signin { username, password } => {
                let username = app.sign_in(&username, &SecretString::from(password))?;
                writeln!(self.output, "Welcome back, {username}!")?;
                self.enter_main(app).await?;
            }
            ShellCommand::Signout => {
                app.sign_out()?;
                writeln!(self.output, "Signed out.")?;
            }
            ShellCommand::Toggle => {
                let form = match app.toggle_form() {
                    AuthForm::SignIn => "sign-in",
                    AuthForm::SignUp => "sign-up",
                };
                writeln!(self.output, "Showing the {form} form.")?;
            }
            ShellCommand::Open { path } => {
                let outcome = match app.resolve(&path) {
                    Resolution::Render(view) => format!("renders {}", prompt_label(view)),
                    Resolution::Redirect(to) => format!("redirects to {to}"),
                    Resolution::NotFound => "not found".to_string(),
                };
                writeln!(self.output, "{path} {outcome}")?;
            }
            ShellCommand::Catalog => {
                let page = app.page_mut()?;
                page.load_catalog(&self.client).await;
                write_catalog(&mut self.output, page.catalog())?;
            }
            ShellCommand::Add { id } => {
                app.page_mut()?.add_product_to_cart(id)?;
                writeln!(self.output, "Added product {id} to the cart.")?;
            }
            ShellCommand::Wish { id } => {
                app.page_mut()?.add_product_to_wishlist(id)?;
                writeln!(self.output, "Added product {id} to the wishlist.")?;
            }
            ShellCommand::Unwish { name } => {
                let name = name.join(" ");
                let removed = app.page_mut()?.remove_from_wishlist(&name);
                writeln!(self.output, "Removed {removed} wishlist item(s).")?;
            }
            ShellCommand::Cart => {
                let page = app.page_mut()?;
                write_cart(&mut self.output, page.cart())?;
            }
            ShellCommand::Remove { name } => {
                let name = name.join(" ");
                let page = app.page_mut()?;
                let (input, output) = (&mut self.input, &mut self.output);
                let mut confirm = |message: &str| ask(&mut *input, &mut *output, message);
                if page.remove_from_cart(&name, &mut confirm) {
                    writeln!(self.output, "Removed {name} from the cart.")?;
                } else {
                    writeln!(self.output, "Cart unchanged.")?;
                }
            }
            ShellCommand::Qty { args } => {
                let page = app.page_mut()?;
                let Some((quantity, name)) = args.split_last() else {
                    return Ok(Flow::Continue);
                };
                let Ok(quantity) = quantity.parse::<i64>() else {
                    writeln!(self.output, "Quantity must be a whole number.")?;
                    return Ok(Flow::Continue);
                };
                let name = name.join(" ");
                if page.update_quantity(&name, quantity) {
                    writeln!(self.output, "{name} quantity set to {quantity}.")?;
                } else {
                    writeln!(self.output, "{name} is not in the cart.")?;
                }
            }
            ShellCommand::Wishlist => {
                let page = app.page_mut()?;
                write_wishlist(&mut self.output, page.wishlist())?;
            }
            ShellCommand::Address { text } => {
                app.page_mut()?.set_shipping_address(text.join(" "));
                writeln!(self.output, "Shipping address set.")?;
            }
            ShellCommand::Order => {
                let id = app.page_mut()?.place_order()?;
                writeln!(self.output, "Order ID: {id}")?;
            }
            ShellCommand::Orders => {
                let page = app.page_mut()?;
                write_orders(&mut self.output, page.orders())?;
            }
            ShellCommand::Advance { id } => {
                let status = app.page_mut()?.advance_order(id)?;
                writeln!(self.output, "Order ID: {id} is now {status}.")?;
            }
            ShellCommand::Cancel { id } => {
                let page = app.page_mut()?;
                let (input, output) = (&mut self.input, &mut self.output);
                let mut confirm = |message: &str| ask(&mut *input, &mut *output, message);
                if page.cancel_order(id, &mut confirm)? == Cancellation::Declined {
                    writeln!(self.output, "Order ID: {id} kept.")?;
                }
            }
            ShellCommand::Help => writeln!(self.output, "{HELP}")?,
            ShellCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Load and show the catalog, as the main page does when it opens.
    async fn enter_main<S: KeyValueStore>(&mut self, app: &mut Storefront<S>) -> Result<(), CliError> {
        let page = app.page_mut()?;
        page.load_catalog(&self.client).await;
        write_catalog(&mut self.output, page.catalog())?;
        Ok(())
    }

    fn show_toasts<S: KeyValueStore>(&mut self, app: &mut Storefront<S>) -> Result<(), CliError> {
        let Ok(page) = app.page_mut() else {
            return Ok(());
        };
        for Toast { level, message } in page.drain_toasts() {
            let tag = match level {
                ToastLevel::Success => "ok",
                ToastLevel::Info => "info",
            };
            writeln!(self.output, "[{tag}] {message}")?;
        }
        Ok(())
    }
}

const fn prompt_label(view: View) -> &'static str {
    match view {
        View::SignIn => "sign-in",
        View::SignUp => "sign-up",
        View::Main => "main",
    }
}

/// Ask a yes/no question. Anything but `y`/`yes`, including I/O failure,
/// is a no.
fn ask(input: &mut impl BufRead, output: &mut impl Write, message: &str) -> bool {
    if write!(output, "{message} [y/N] ")
        .and_then(|()| output.flush())
        .is_err()
    {
        return false;
    }

    let mut answer = String::new();
    if input.read_line(&mut answer).is_err() {
        return false;
    }
    let yes = matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes");
    debug!(question = message, yes, "Confirmation answered");
    yes
}

fn write_cart(out: &mut impl Write, cart: &Cart) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty.");
    }
    for item in cart.items() {
        writeln!(
            out,
            "{:<40} {:>4} x {:<12} {}",
            item.name,
            item.quantity,
            item.price,
            item.total()
        )?;
    }
    writeln!(
        out,
        "Items: {}  Grand total: {}",
        cart.item_count(),
        cart.grand_total()
    )
}

fn write_wishlist(out: &mut impl Write, wishlist: &Wishlist) -> std::io::Result<()> {
    if wishlist.is_empty() {
        return writeln!(out, "Your wishlist is empty.");
    }
    for item in wishlist.items() {
        writeln!(out, "{:<40} {}", item.name, item.price)?;
    }
    Ok(())
}

fn write_orders(out: &mut impl Write, orders: &[Order]) -> std::io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders yet.");
    }
    for order in orders {
        writeln!(
            out,
            "Order ID: {}  [{}]  Tracking ID: {}  Placed: {}",
            order.id,
            order.status,
            order.tracking_id,
            order.placed_at.format("%Y-%m-%d %H:%M")
        )?;
        writeln!(out, "  Ship to: {}", order.shipping_address)?;
        for item in &order.items {
            writeln!(out, "  {} x {} @ {}", item.quantity, item.name, item.price)?;
        }
        writeln!(out, "  Total: {}", order.total())?;
        if order.status != OrderStatus::Delivered {
            writeln!(out, "  Next: {}", order.status.action_label())?;
        }
        if order.status.is_cancellable() {
            writeln!(out, "  Can be cancelled")?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use quickcart_integration_tests::CatalogServer;
    use quickcart_storefront::storage::MemoryStore;

    use super::*;

    fn unreachable_client() -> CatalogClient {
        CatalogClient::with_endpoint("http://127.0.0.1:1/products".parse().unwrap())
    }

    async fn run_script(app: &mut Storefront<MemoryStore>, script: &str) -> String {
        run_script_with(app, script, unreachable_client()).await
    }

    async fn run_script_with(
        app: &mut Storefront<MemoryStore>,
        script: &str,
        client: CatalogClient,
    ) -> String {
        let mut output = Vec::new();
        {
            let input = Cursor::new(script.as_bytes());
            let mut shell = Shell::new(input, &mut output, client);
            shell.run(app).await.unwrap();
        }
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn test_sign_in_scenario() {
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let output = run_script(
            &mut app,
            "signup alice pw1\nsignout\nsignin alice wrong\nsignin alice pw1\nquit\n",
        )
        .await;

        assert!(output.contains("Welcome, alice!"));
        assert!(output.contains("Signed out."));
        assert!(output.contains("Alert: Invalid username or password"));
        assert!(output.contains("Welcome back, alice!"));
        assert!(app.is_signed_in());
    }

    #[tokio::test]
    async fn test_empty_cart_order_alert() {
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let output = run_script(
            &mut app,
            "signup bob pw\naddress 1 Main Street\norder\norders\n",
        )
        .await;

        assert!(output.contains("Could not load products"));
        assert!(output.contains("Alert: Please add items to the cart before placing an order."));
        assert!(output.contains("No orders yet."));
    }

    #[tokio::test]
    async fn test_signed_out_actions_alert() {
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let output = run_script(&mut app, "cart\nopen /main\ntoggle\n").await;

        assert!(output.contains("Alert: Please sign in first."));
        assert!(output.contains("/main redirects to /"));
        assert!(output.contains("Showing the sign-up form."));
        assert!(output.contains("sign-up> "));
    }

    #[tokio::test]
    async fn test_unknown_command_keeps_running() {
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let output = run_script(&mut app, "fly\nhelp\n").await;

        assert!(output.contains("error"));
        assert!(output.contains("qty <name> <n>"));
        assert!(output.ends_with("Bye.\n"));
    }

    #[tokio::test]
    async fn test_prompts_read_answers_from_the_script() {
        let server = CatalogServer::spawn().await.unwrap();
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let script = "\
signup ann pw
add 1
remove Essence Mascara Lash Princess
n
cart
address 1 Main Street
order
advance 1
cancel 1
y
orders
";
        let output = run_script_with(&mut app, script, server.client("/products")).await;

        assert!(output.contains("Red Lipstick"));
        assert!(output.contains("Added product 1 to the cart."));
        assert!(output.contains(
            "Are you sure you want to remove Essence Mascara Lash Princess from the cart? [y/N] "
        ));
        assert!(output.contains("Cart unchanged."));
        assert!(output.contains("Items: 1"));
        assert!(output.contains("Order ID: 1\n"));
        assert!(output.contains("[ok] Order placed successfully!"));
        assert!(output.contains("Order ID: 1 is now Processing."));
        assert!(output.contains("Are you sure you want to cancel order ID: 1? [y/N] "));
        assert!(output.contains("[info] Order ID: 1 cancelled."));
        assert!(output.contains("No orders yet."));
        assert!(output.ends_with("Bye.\n"));

        // The answers were consumed by the prompts, not run as commands.
        assert!(!output.contains("unrecognized subcommand"));
        assert!(app.page().unwrap().orders().is_empty());
    }

    #[tokio::test]
    async fn test_declined_cancel_keeps_order() {
        let server = CatalogServer::spawn().await.unwrap();
        let mut app = Storefront::new(MemoryStore::new()).unwrap();
        let script = "\
signup bea pw
add 2
address 9 Side Road
order
cancel 1
advance 1
cancel 1
no
advance 1
advance 1
advance 1
";
        let output = run_script_with(&mut app, script, server.client("/products")).await;

        assert!(output.contains("Alert: Order ID: 1 cannot be cancelled while Placed."));
        assert!(output.contains("Order ID: 1 kept."));
        assert!(output.contains("Order ID: 1 is now Delivered."));
        assert!(output.contains("Alert: Order ID: 1 is already Delivered."));

        let orders = app.page().unwrap().orders();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].status, OrderStatus::Delivered);
    }

    #[test]
    fn test_ask_accepts_yes_only() {
        let mut out = Vec::new();
        assert!(ask(&mut Cursor::new("y\n"), &mut out, "Sure?"));
        assert!(ask(&mut Cursor::new("YES\n"), &mut out, "Sure?"));
        assert!(!ask(&mut Cursor::new("\n"), &mut out, "Sure?"));
        assert!(!ask(&mut Cursor::new(""), &mut out, "Sure?"));
        assert!(String::from_utf8(out).unwrap().starts_with("Sure? [y/N] "));
    }

    #[test]
    fn test_parse_multi_word_arguments() {
        let line = ShellLine::try_parse_from(["qty", "Red", "Lipstick", "3"]).unwrap();
        let ShellCommand::Qty { args } = line.command else {
            panic!("expected qty");
        };
        assert_eq!(args, ["Red", "Lipstick", "3"]);

        let line = ShellLine::try_parse_from(["advance", "7"]).unwrap();
        assert!(matches!(line.command, ShellCommand::Advance { id } if id == OrderId::new(7)));
    }
}
