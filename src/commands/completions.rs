use super::complete::{value_sources, ValueSource};
use crate::Cli;
use anyhow::{bail, Result};
use clap::CommandFactory;
use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
};
use std::io::Write;

/// Print the completion script for `shell`.
///
/// To load completions in the current bash session run
/// `. <(cloudctl completion bash)`, for zsh `source <(cloudctl completion zsh)`.
/// The generated script is followed by a wrapper that asks the hidden
/// `cloudctl __complete` command for live argument values such as cluster
/// ids or partitions.
pub fn run<W: Write>(shell: &str, out: &mut W) -> Result<()> {
    let mut cmd = Cli::command();
    let sources = value_sources();
    let values = match shell {
        "bash" => {
            generate(Bash, &mut cmd, "cloudctl", &mut *out);
            bash_values(&sources)
        }
        "zsh" => {
            generate(Zsh, &mut cmd, "cloudctl", &mut *out);
            zsh_values(&sources)
        }
        "fish" => {
            generate(Fish, &mut cmd, "cloudctl", &mut *out);
            fish_values(&sources)
        }
        other => bail!("unsupported shell '{}', choose: bash, zsh, fish", other),
    };
    out.write_all(values.as_bytes())?;
    Ok(())
}

/// `[[ ]]` test selecting `src`, shared by bash and zsh.
///
/// `$line` holds the words before the cursor padded with spaces, `$prev` the
/// word right before it.
fn test_expr(src: &ValueSource) -> String {
    let mut parts = Vec::new();
    if !src.path.is_empty() {
        if src.flags.is_empty() {
            // positional: the path is the last thing typed
            parts.push(format!("\"$line\" == *\" {} \"", src.path));
        } else {
            parts.push(format!("\"$line\" == *\" {} \"*", src.path));
        }
    }
    if !src.flags.is_empty() {
        let flags: Vec<String> = src
            .flags
            .iter()
            .map(|f| format!("\"$prev\" == \"{f}\""))
            .collect();
        parts.push(format!("( {} )", flags.join(" || ")));
    }
    parts.join(" && ")
}

fn kind_selection(sources: &[ValueSource]) -> String {
    sources
        .iter()
        .map(|src| {
            format!(
                "    if [[ -z \"$kind\" && {} ]]; then kind={}; fi\n",
                test_expr(src),
                src.kind.name()
            )
        })
        .collect()
}

fn bash_values(sources: &[ValueSource]) -> String {
    format!(
        r#"
_cloudctl_values() {{
    local cur="${{COMP_WORDS[COMP_CWORD]}}" prev="${{COMP_WORDS[COMP_CWORD-1]}}"
    local line=" ${{COMP_WORDS[*]:1:COMP_CWORD-1}} "
    local kind=""
{}    if [[ -n "$kind" ]]; then
        COMPREPLY=($(compgen -W "$(cloudctl __complete "$kind" 2>/dev/null)" -- "$cur"))
        return 0
    fi
    _cloudctl "$@"
}}

complete -F _cloudctl_values -o bashdefault -o default cloudctl
"#,
        kind_selection(sources)
    )
}

fn zsh_values(sources: &[ValueSource]) -> String {
    format!(
        r#"
_cloudctl_values() {{
    local line=" ${{words[2,CURRENT-1]}} " prev="${{words[CURRENT-1]}}"
    local kind=""
{}    if [[ -n "$kind" ]]; then
        local -a values
        values=(${{(f)"$(cloudctl __complete "$kind" 2>/dev/null)"}})
        compadd -a values
        return
    fi
    _cloudctl "$@"
}}

compdef _cloudctl_values cloudctl
"#,
        kind_selection(sources)
    )
}

fn fish_values(sources: &[ValueSource]) -> String {
    let mut script = String::from("\n");
    for src in sources {
        let mut line = String::from("complete -c cloudctl");
        if !src.path.is_empty() {
            let seen: Vec<String> = src
                .path
                .split_whitespace()
                .map(|word| format!("__fish_seen_subcommand_from {word}"))
                .collect();
            line.push_str(&format!(" -n '{}'", seen.join("; and ")));
        }
        for flag in src.flags {
            match flag.strip_prefix("--") {
                Some(long) => line.push_str(&format!(" -l {long}")),
                None => line.push_str(&format!(" -s {}", flag.trim_start_matches('-'))),
            }
        }
        if !src.flags.is_empty() {
            line.push_str(" -r");
        }
        line.push_str(&format!(
            " -f -a '(cloudctl __complete {} 2>/dev/null)'\n",
            src.kind.name()
        ));
        script.push_str(&line);
    }
    script
}
