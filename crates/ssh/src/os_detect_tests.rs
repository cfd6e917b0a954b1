use super::*;
use yare::parameterized;

#[parameterized(
    ubuntu = { "ubuntu", TargetOs::Debian },
    debian = { "debian", TargetOs::Debian },
    rhel = { "rhel", TargetOs::RedHat },
    fedora = { "fedora", TargetOs::RedHat },
    arch = { "arch", TargetOs::Arch },
    gentoo = { "gentoo", TargetOs::Unknown },
)]
fn classifies_distro_id(id: &str, expected: TargetOs) {
    assert_eq!(TargetOs::from_distro_id(id), expected);
}

#[test]
fn unknown_distro_has_no_install_command() {
    assert!(TargetOs::Unknown.package_install_command("/tmp/pkg").is_err());
}

#[test]
fn debian_uses_dpkg() {
    let cmd = TargetOs::Debian.package_install_command("/tmp/agent.deb").unwrap();
    assert_eq!(cmd, "dpkg -i /tmp/agent.deb");
}

#[parameterized(
    x86_64 = { "x86_64", "amd64" },
    aarch64 = { "aarch64", "arm64" },
    armv7l = { "armv7l", "arm" },
)]
fn normalizes_arch(uname_m: &str, expected: &str) {
    assert_eq!(normalize_arch(uname_m), expected);
}
