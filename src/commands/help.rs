pub fn print_help() {
    println!(
        "\
Screens
  transfers [page]          list credit transfers
  ledger [page]             list ledger entries
  payments [accountId]      list system payments, optionally for one account

Navigation (current screen)
  next | prev | page <n>    move between pages
  search <id>               show only rows with this id on the current page
  reset                     clear the search
  refresh                   reload the current page

Actions
  execute <id>              execute a CREATED transfer
  revoke <id>               revoke a CREATED transfer
  reverse <id>              reverse a ledger entry
  status <id> <STATUS>      set a payment to EXECUTED, FAILED, CANCELLED or PENDING
  create                    new transfer or payment (current screen)

  help                      show this list
  quit                      leave the console"
    );
}
